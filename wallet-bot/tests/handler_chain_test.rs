//! Integration tests for [`wallet_bot::HandlerChain`].
//!
//! Covers: scope handler stopping the chain before any command runs, Ignore falling through to
//! the next handler, Reply ending the handle phase and reaching after(), and after() running
//! in reverse order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use wallet_bot::{
    Chat, ChatKind, Handler, HandlerChain, HandlerResponse, Message, ScopeHandler, User,
};

fn message_in(kind: ChatKind, chat_id: i64) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat { id: chat_id, kind },
        content: "/balance".to_string(),
        created_at: Utc::now(),
    }
}

/// Counts handle() calls and answers with a fixed response.
struct Fixed {
    response: HandlerResponse,
    calls: Arc<AtomicUsize>,
}

impl Fixed {
    fn new(response: HandlerResponse) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Arc::new(Self {
                response,
                calls: calls.clone(),
            }),
            calls,
        )
    }
}

#[async_trait]
impl Handler for Fixed {
    async fn handle(&self, _message: &Message) -> wallet_bot::Result<HandlerResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// **Test: out-of-scope chats never reach the command handler**
///
/// **Setup:** Scope allows only group -100; a counting handler follows it.
///
/// **Action:** Message from group -200.
///
/// **Expected:** Stop; the counting handler never ran.
#[tokio::test]
async fn test_scope_stops_chain_for_unknown_group() {
    let (counting, calls) = Fixed::new(HandlerResponse::Reply("hi".to_string()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(ScopeHandler::new(Some(-100))))
        .add_handler(counting);

    let result = chain
        .handle(&message_in(ChatKind::Group, -200))
        .await
        .unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// **Test: in-scope chats pass through the scope handler**
#[tokio::test]
async fn test_scope_passes_private_and_configured_group() {
    let (counting, calls) = Fixed::new(HandlerResponse::Reply("hi".to_string()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(ScopeHandler::new(Some(-100))))
        .add_handler(counting);

    let private = chain
        .handle(&message_in(ChatKind::Private, 123))
        .await
        .unwrap();
    let group = chain
        .handle(&message_in(ChatKind::Supergroup, -100))
        .await
        .unwrap();

    assert_eq!(private, HandlerResponse::Reply("hi".to_string()));
    assert_eq!(group, HandlerResponse::Reply("hi".to_string()));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

/// **Test: Ignore falls through; Reply ends the handle phase**
///
/// **Setup:** Ignore → Reply("first") → Reply("second").
///
/// **Expected:** Reply("first"); the last handler never ran.
#[tokio::test]
async fn test_ignore_falls_through_and_reply_stops() {
    let (ignoring, ignored_calls) = Fixed::new(HandlerResponse::Ignore);
    let (first, first_calls) = Fixed::new(HandlerResponse::Reply("first".to_string()));
    let (second, second_calls) = Fixed::new(HandlerResponse::Reply("second".to_string()));
    let chain = HandlerChain::new()
        .add_handler(ignoring)
        .add_handler(first)
        .add_handler(second);

    let result = chain
        .handle(&message_in(ChatKind::Private, 123))
        .await
        .unwrap();

    assert_eq!(result, HandlerResponse::Reply("first".to_string()));
    assert_eq!(ignored_calls.load(Ordering::SeqCst), 1);
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

/// **Test: nobody answering leaves the response at Continue**
#[tokio::test]
async fn test_no_reply_yields_continue() {
    let (ignoring, _) = Fixed::new(HandlerResponse::Ignore);
    let chain = HandlerChain::new().add_handler(ignoring);

    let result = chain
        .handle(&message_in(ChatKind::Private, 123))
        .await
        .unwrap();

    assert_eq!(result, HandlerResponse::Continue);
}

/// **Test: before runs first→last, after runs last→first and sees the final reply**
#[tokio::test]
async fn test_before_and_after_order() {
    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Handler for Recorder {
        async fn before(&self, _message: &Message) -> wallet_bot::Result<bool> {
            self.log.lock().unwrap().push(format!("before_{}", self.name));
            Ok(true)
        }

        async fn after(
            &self,
            _message: &Message,
            response: &HandlerResponse,
        ) -> wallet_bot::Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(format!("after_{}:{:?}", self.name, response));
            Ok(())
        }
    }

    let log = Arc::new(Mutex::new(Vec::new()));
    let (replying, _) = Fixed::new(HandlerResponse::Reply("ok".to_string()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(Recorder {
            name: "first",
            log: log.clone(),
        }))
        .add_handler(Arc::new(Recorder {
            name: "second",
            log: log.clone(),
        }))
        .add_handler(replying);

    chain
        .handle(&message_in(ChatKind::Private, 123))
        .await
        .unwrap();

    let executed = log.lock().unwrap();
    assert_eq!(
        *executed,
        vec![
            "before_first".to_string(),
            "before_second".to_string(),
            "after_second:Reply(\"ok\")".to_string(),
            "after_first:Reply(\"ok\")".to_string(),
        ]
    );
}
