//! Command table: maps `/name` to a [`Command`]. Native commands and the group-text fallback
//! both resolve through it, so every entry point reaches the same handler.

/// Commands the bot answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Register,
    Unregister,
    Balance,
    SetName,
}

/// Command names as typed after `/`.
///
/// The native path matches a name exactly. The group-text fallback only checks that the text
/// starts with `/name`, so `/registerme addrA` in the configured group runs `/register addrA`.
/// That looseness is deliberate; first match in table order wins.
pub const COMMAND_TABLE: &[(&str, Command)] = &[
    ("start", Command::Start),
    ("register", Command::Register),
    ("unregister", Command::Unregister),
    ("balance", Command::Balance),
    ("setname", Command::SetName),
];

impl Command {
    pub fn name(self) -> &'static str {
        COMMAND_TABLE
            .iter()
            .find(|(_, c)| *c == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    fn lookup(name: &str) -> Option<Self> {
        COMMAND_TABLE
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }
}

/// A resolved command plus its first argument token, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub argument: Option<String>,
}

/// Splits `/name@bot` into `("name", Some("bot"))`.
fn split_mention(head: &str) -> (&str, Option<&str>) {
    match head.split_once('@') {
        Some((name, mention)) => (name, Some(mention)),
        None => (head, None),
    }
}

/// True when the command is explicitly addressed to some other bot.
fn addressed_elsewhere(mention: Option<&str>, bot_username: Option<&str>) -> bool {
    match (mention, bot_username) {
        (Some(mention), Some(me)) => !mention.eq_ignore_ascii_case(me),
        _ => false,
    }
}

fn first_argument(text: &str) -> Option<String> {
    text.split_whitespace().nth(1).map(str::to_string)
}

/// Native command: the first token is exactly `/name` or `/name@<bot_username>`.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<Invocation> {
    let head = text.split_whitespace().next()?.strip_prefix('/')?;
    let (name, mention) = split_mention(head);
    if addressed_elsewhere(mention, bot_username) {
        return None;
    }
    Some(Invocation {
        command: Command::lookup(name)?,
        argument: first_argument(text),
    })
}

/// Group-text fallback: any text that starts with `/name`, e.g. `/balance` or `/balancecheck`.
/// Intentionally loose (see [`COMMAND_TABLE`]); only used for the configured group.
pub fn match_command_prefix(text: &str, bot_username: Option<&str>) -> Option<Invocation> {
    let rest = text.strip_prefix('/')?;
    let head = rest.split_whitespace().next().unwrap_or_default();
    if addressed_elsewhere(split_mention(head).1, bot_username) {
        return None;
    }
    let command = COMMAND_TABLE
        .iter()
        .find(|(name, _)| rest.starts_with(name))
        .map(|(_, c)| *c)?;
    Some(Invocation {
        command,
        argument: first_argument(text),
    })
}
