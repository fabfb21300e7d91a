//! User-facing reply texts.

pub const HELP_TEXT: &str = "/register <wallet_address> - Register your address to track its balance\n\
/unregister - Remove your registered address\n\
/balance - Show the current balance of your registered address\n\
/setname <name> - Set or update your name\n\
/start - Show this list of commands";

pub const REGISTER_USAGE: &str =
    "Please provide a valid wallet address. Example: /register <wallet_address>";
pub const SETNAME_USAGE: &str = "Please provide a valid name. Example: /setname <name>";
pub const GENERIC_USAGE: &str = "Missing argument. Send /start to see how to use each command.";

pub const DUPLICATE_ADDRESS: &str = "This address is already registered.";
pub const NOT_REGISTERED: &str = "No address registered. Use /register to register an address.";
pub const TOOL_FAILED: &str = "Error while retrieving the balance. Please try again later.";
pub const MALFORMED_RESPONSE: &str =
    "Error while reading the balance response. Please try again later.";
pub const STORE_FAILED: &str = "Something went wrong while saving your data. Please try again later.";
pub const UNREGISTERED: &str = "Your address has been successfully removed.";

pub fn registered(address: &str, balance: &str, unit: &str) -> String {
    format!(
        "Address registered: {} with a balance of: {} {}.",
        address, balance, unit
    )
}

pub fn current_balance(balance: &str, unit: &str) -> String {
    format!("Your current balance is: {} {}.", balance, unit)
}

pub fn name_updated(name: &str) -> String {
    format!("Your name has been updated: {}", name)
}
