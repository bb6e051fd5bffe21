// Session-level behaviour with in-memory models standing in for Bedrock.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use chatmux::cli::history_lines;
use chatmux::session::IMAGE_ACK;
use chatmux::{
    ChatError, ChatModel, ChatResult, ChatSession, ContentBlock, ImageModel, Input, Message,
    Outcome, Role,
};

/// Replies with queued answers; an `Err` entry simulates a failed call
struct ScriptedChat {
    replies: Mutex<Vec<ChatResult<String>>>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedChat {
    fn new(mut replies: Vec<ChatResult<String>>) -> Arc<Self> {
        replies.reverse();
        Arc::new(Self {
            replies: Mutex::new(replies),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    async fn reply(&self, messages: &[Message]) -> ChatResult<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok("default".to_string()))
    }

    fn model(&self) -> String {
        "scripted-chat".to_string()
    }
}

struct StubImages {
    fail: bool,
    prompts: Mutex<Vec<String>>,
}

impl StubImages {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ImageModel for StubImages {
    async fn generate(&self, prompt: &str) -> ChatResult<Vec<u8>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            Err(ChatError::malformed("response has no artifacts"))
        } else {
            Ok(b"\x89PNG generated".to_vec())
        }
    }

    fn model(&self) -> String {
        "stub-images".to_string()
    }
}

#[tokio::test]
async fn test_hello_scenario() -> Result<()> {
    let chat = ScriptedChat::new(vec![Ok("hi".to_string())]);
    let mut session = ChatSession::new(chat.clone(), StubImages::new(false));

    let outcome = session.submit(&Input::text("hello")).await?;

    assert_eq!(outcome, Outcome::Reply("hi".to_string()));
    assert_eq!(chat.calls(), vec![vec![Message::user("hello")]]);
    assert_eq!(
        history_lines(session.history().messages()),
        vec!["User: hello", "Assistant: hi"]
    );
    Ok(())
}

#[tokio::test]
async fn test_history_is_sent_as_context() -> Result<()> {
    let chat = ScriptedChat::new(vec![Ok("one".to_string()), Ok("two".to_string())]);
    let mut session = ChatSession::new(chat.clone(), StubImages::new(false));

    session.submit(&Input::text("first")).await?;
    session.submit(&Input::text("second")).await?;

    let calls = chat.calls();
    assert_eq!(calls[1].len(), 3);
    assert_eq!(calls[1][0], Message::user("first"));
    assert_eq!(calls[1][1], Message::assistant("one"));
    assert_eq!(calls[1][2], Message::user("second"));
    assert_eq!(session.history().len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_history_grows_by_two_per_successful_turn() -> Result<()> {
    let chat = ScriptedChat::new(vec![]);
    let mut session = ChatSession::new(chat, StubImages::new(false));

    let inputs = vec![
        Input::text("a"),
        Input::image(b"img".to_vec()),
        Input::text_and_image("b", b"img".to_vec()),
        Input::text("generate image a tree"),
    ];

    let mut previous = session.history().len();
    for input in &inputs {
        session.submit(input).await?;
        let len = session.history().len();
        assert_eq!(len, previous + 2);
        previous = len;
    }
    Ok(())
}

#[tokio::test]
async fn test_failed_reply_leaves_history_untouched() -> Result<()> {
    let chat = ScriptedChat::new(vec![
        Ok("fine".to_string()),
        Err(ChatError::Api {
            status: 503,
            body: "unavailable".to_string(),
        }),
    ]);
    let mut session = ChatSession::new(chat, StubImages::new(false));

    session.submit(&Input::text("hello")).await?;
    let before = session.history().clone();

    let err = session.submit(&Input::text("again")).await.unwrap_err();

    assert!(matches!(err, ChatError::Api { status: 503, .. }));
    assert_eq!(session.history(), &before);
    Ok(())
}

#[tokio::test]
async fn test_image_upload_goes_to_chat_model() -> Result<()> {
    let chat = ScriptedChat::new(vec![Ok("a diagram".to_string())]);
    let images = StubImages::new(false);
    let mut session = ChatSession::new(chat.clone(), images.clone());

    let outcome = session
        .submit(&Input::text_and_image("generate image like this", b"upload".to_vec()))
        .await?;

    assert_eq!(outcome, Outcome::Reply("a diagram".to_string()));
    assert!(images.prompts.lock().unwrap().is_empty());

    let sent = &chat.calls()[0][0];
    assert_eq!(sent.content[0], ContentBlock::text("generate image like this"));
    assert_eq!(sent.content[1], ContentBlock::png(b"upload"));
    Ok(())
}

#[tokio::test]
async fn test_image_only_upload_has_no_text_block() -> Result<()> {
    let chat = ScriptedChat::new(vec![Ok("a cat".to_string())]);
    let mut session = ChatSession::new(chat.clone(), StubImages::new(false));

    session.submit(&Input::image(b"upload".to_vec())).await?;

    assert_eq!(chat.calls()[0][0].content, vec![ContentBlock::png(b"upload")]);
    Ok(())
}

#[tokio::test]
async fn test_generate_image_records_command_and_ack() -> Result<()> {
    let chat = ScriptedChat::new(vec![]);
    let images = StubImages::new(false);
    let mut session = ChatSession::new(chat.clone(), images.clone());

    let outcome = session.submit(&Input::text("Generate Image a red boat")).await?;

    match outcome {
        Outcome::Image(image) => {
            assert_eq!(image.prompt, "a red boat");
            assert_eq!(image.bytes, b"\x89PNG generated");
        }
        other => panic!("expected image outcome, got {:?}", other),
    }
    assert!(chat.calls().is_empty());
    assert_eq!(*images.prompts.lock().unwrap(), vec!["a red boat".to_string()]);

    let history = session.history().messages();
    assert_eq!(history[0], Message::user("Generate Image a red boat"));
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].text(), IMAGE_ACK);
    Ok(())
}

#[tokio::test]
async fn test_failed_generation_leaves_history_untouched() -> Result<()> {
    let mut session = ChatSession::new(ScriptedChat::new(vec![]), StubImages::new(true));

    let result = session.submit(&Input::text("generate image nothing")).await;

    assert!(matches!(result, Err(ChatError::MalformedResponse(_))));
    assert!(session.history().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_input_is_noop() -> Result<()> {
    let chat = ScriptedChat::new(vec![]);
    let mut session = ChatSession::new(chat.clone(), StubImages::new(false));

    let outcome = session.submit(&Input::new(Some("  ".to_string()), None)).await?;

    assert_eq!(outcome, Outcome::Noop);
    assert!(chat.calls().is_empty());
    assert!(session.history().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_reset_clears_history() -> Result<()> {
    let mut session = ChatSession::new(ScriptedChat::new(vec![]), StubImages::new(false));
    session.submit(&Input::text("hello")).await?;

    session.reset();

    assert!(session.history().is_empty());
    Ok(())
}
