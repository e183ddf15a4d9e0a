mod common;

use std::sync::Arc;

use billmart_widget::error::{WebhookError, WidgetError};
use billmart_widget::services::{faq::FaqCatalog, widget::ChatWidget};
use billmart_widget::view::{Block, Side, ViewMode};
use common::{FakeWebhook, text, with_buttons};

fn widget_with(hook: Arc<FakeWebhook>) -> ChatWidget {
    ChatWidget::new(Arc::new(FaqCatalog::default()), hook)
}

#[tokio::test]
async fn open_always_starts_at_faq_menu() {
    let hook = FakeWebhook::new();
    let widget = widget_with(hook.clone());

    widget.open().await;
    let panel = widget.panel().await;
    assert!(panel.visible);
    assert_eq!(panel.mode, ViewMode::Faq);
    assert_eq!(panel.content, vec![Block::FaqMenu]);
    assert!(!panel.input_visible);

    // Move to free text, chat a bit, then reopen
    widget.show_free_text_view().await;
    widget.submit_user_text("hello").await.unwrap().join().await;
    widget.close().await;
    widget.open().await;

    let panel = widget.panel().await;
    assert_eq!(panel.mode, ViewMode::Faq);
    assert_eq!(panel.content, vec![Block::FaqMenu]);
    assert!(!panel.input_visible);
}

#[tokio::test]
async fn close_keeps_rendered_content() {
    let widget = widget_with(FakeWebhook::new());
    widget.open().await;
    widget.render_user_message("kept".into()).await;
    widget.close().await;

    let panel = widget.panel().await;
    assert!(!panel.visible);
    assert_eq!(panel.bubbles().count(), 1);
}

#[tokio::test]
async fn free_text_view_clears_and_reveals_input() {
    let widget = widget_with(FakeWebhook::new());
    widget.open().await;
    widget.show_free_text_view().await;

    let panel = widget.panel().await;
    assert!(panel.content.is_empty());
    assert!(panel.input_visible);
    assert_eq!(panel.mode, ViewMode::FreeText);
}

#[tokio::test]
async fn whitespace_input_sends_nothing() {
    let hook = FakeWebhook::new();
    let widget = widget_with(hook.clone());
    widget.show_free_text_view().await;

    assert!(widget.submit_user_text("   \t\n ").await.is_none());
    assert!(widget.submit_user_text("").await.is_none());

    assert!(hook.messages().await.is_empty());
    assert_eq!(widget.panel().await.bubbles().count(), 0);
    assert!(!widget.session().is_started());
}

#[tokio::test]
async fn submitted_text_is_trimmed_and_sent() {
    let hook = FakeWebhook::new();
    let widget = widget_with(hook.clone());
    widget.show_free_text_view().await;

    widget.submit_user_text("  how do I apply?  ").await.unwrap().join().await;

    assert_eq!(hook.messages().await, vec!["how do I apply?"]);
    let panel = widget.panel().await;
    let first = panel.bubbles().next().unwrap();
    assert_eq!(first.side, Side::User);
    assert_eq!(first.text, "how do I apply?");
}

#[tokio::test]
async fn select_faq_echoes_title_and_sends_payload() {
    let hook = FakeWebhook::new();
    let widget = widget_with(hook.clone());
    widget.open().await;

    let entry = widget.faqs().entries()[1].clone();
    widget.select_faq(&entry.payload).await.unwrap().join().await;

    let panel = widget.panel().await;
    let bubbles: Vec<_> = panel.bubbles().collect();
    assert_eq!(bubbles.len(), 1);
    assert_eq!(bubbles[0].side, Side::User);
    assert_eq!(bubbles[0].text, entry.title);
    // Menu stays on screen above the conversation
    assert_eq!(panel.content[0], Block::FaqMenu);

    let sent = hook.sent.lock().await.clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message, "/ask_empcash_info");
    assert_eq!(sent[0].sender, format!("user_{}", widget.session().id()));
}

#[tokio::test]
async fn unknown_faq_payload_is_rejected_without_effect() {
    let hook = FakeWebhook::new();
    let catalog = FaqCatalog::new(vec![]);
    let widget = ChatWidget::new(Arc::new(catalog), hook.clone());
    widget.open().await;

    let err = widget.select_faq("/ask_gigcash_info").await.unwrap_err();
    assert_eq!(err, WidgetError::UnknownFaq("/ask_gigcash_info".into()));
    assert_eq!(widget.panel().await.bubbles().count(), 0);
    assert!(hook.messages().await.is_empty());
}

#[tokio::test]
async fn session_id_is_stable_across_messages() {
    let hook = FakeWebhook::new();
    let widget = widget_with(hook.clone());
    widget.show_free_text_view().await;

    widget.submit_user_text("one").await.unwrap().join().await;
    let first = widget.session().id().to_string();
    widget.submit_user_text("two").await.unwrap().join().await;
    assert_eq!(widget.session().id(), first);
    assert_eq!(first.len(), 8);

    let senders: Vec<_> = hook.sent.lock().await.iter().map(|m| m.sender.clone()).collect();
    assert_eq!(senders, vec![format!("user_{first}"); 2]);
}

#[tokio::test]
async fn replies_render_in_order_with_working_quick_replies() {
    let hook = FakeWebhook::new();
    hook.script(vec![text("Hi"), with_buttons("Choose one", &[("A", "/a")])]).await;
    let widget = widget_with(hook.clone());
    widget.show_free_text_view().await;

    widget.submit_user_text("hello").await.unwrap().join().await;

    let panel = widget.panel().await;
    let bots: Vec<_> = panel.bubbles().filter(|b| b.side == Side::Bot).collect();
    assert_eq!(bots.len(), 2);
    assert_eq!(bots[0].text, "Hi");
    assert!(bots[0].buttons.is_empty());
    assert_eq!(bots[1].text, "Choose one");
    assert_eq!(bots[1].buttons.len(), 1);
    assert_eq!(bots[1].buttons[0].title, "A");

    // content: [user "hello", bot "Hi", bot "Choose one"]
    widget.press_quick_reply(2, 0).await.unwrap().join().await;
    assert_eq!(hook.messages().await, vec!["hello", "/a"]);

    let panel = widget.panel().await;
    let last_user = panel.bubbles().filter(|b| b.side == Side::User).last().unwrap();
    assert_eq!(last_user.text, "A");
}

#[tokio::test]
async fn missing_text_renders_empty_bubble() {
    let hook = FakeWebhook::new();
    hook.script(vec![with_buttons("", &[("Yes", "/affirm")]), Default::default()]).await;
    let widget = widget_with(hook.clone());

    widget.dispatch("/greet".into()).await.join().await;

    let panel = widget.panel().await;
    let bots: Vec<_> = panel.bubbles().collect();
    assert_eq!(bots.len(), 2);
    assert_eq!(bots[1].text, "");
    assert!(bots[1].buttons.is_empty());
}

#[tokio::test]
async fn quick_reply_index_must_point_at_bot_button() {
    let widget = widget_with(FakeWebhook::new());
    widget.open().await;
    widget.render_user_message("me".into()).await;

    assert!(matches!(
        widget.press_quick_reply(0, 0).await,
        Err(WidgetError::UnknownQuickReply { bubble: 0, button: 0 })
    ));
    assert!(widget.press_quick_reply(1, 0).await.is_err());
    assert!(widget.press_quick_reply(9, 0).await.is_err());
}

#[tokio::test]
async fn byte_order_mark_counts_as_blank() {
    let hook = FakeWebhook::new();
    let widget = widget_with(hook.clone());
    widget.show_free_text_view().await;

    assert!(widget.submit_user_text("\u{feff}").await.is_none());
    assert!(widget.submit_user_text(" \u{feff}\t").await.is_none());
    assert!(hook.messages().await.is_empty());

    widget.submit_user_text("\u{feff}hi\u{feff}").await.unwrap().join().await;
    assert_eq!(hook.messages().await, vec!["hi"]);
}

#[tokio::test]
async fn render_bot_message_appends_bot_bubble() {
    let widget = widget_with(FakeWebhook::new());
    widget.show_free_text_view().await;

    widget.render_bot_message(None, vec![]).await;
    let quick = with_buttons("", &[("Docs", "/ask_documents")]).buttons.unwrap();
    widget.render_bot_message(Some("Pick one".into()), quick.clone()).await;

    let panel = widget.panel().await;
    let bots: Vec<_> = panel.bubbles().collect();
    assert_eq!(bots.len(), 2);
    assert_eq!(bots[0].side, Side::Bot);
    assert_eq!(bots[0].text, "");
    assert_eq!(bots[1].text, "Pick one");
    assert_eq!(bots[1].buttons, quick);
    assert_eq!(panel.quick_reply(1, 0).unwrap().payload, "/ask_documents");
}

#[tokio::test]
async fn pending_tracks_in_flight_dispatches() {
    let hook = FakeWebhook::new();
    hook.script(vec![text("late")]).await;
    let gate = hook.gate("/slow").await;
    let widget = widget_with(hook.clone());

    let handle = widget.dispatch("/slow".into()).await;
    assert_eq!(widget.panel().await.pending, 1);

    gate.notify_one();
    handle.join().await;

    let panel = widget.panel().await;
    assert_eq!(panel.pending, 0);
    assert_eq!(panel.bubbles().next().unwrap().text, "late");
}

#[tokio::test]
async fn concurrent_replies_render_in_completion_order() {
    let hook = FakeWebhook::new();
    hook.script_for("first", vec![text("re:first")]).await;
    hook.script_for("second", vec![text("re:second")]).await;
    let first_gate = hook.gate("first").await;
    let second_gate = hook.gate("second").await;
    let widget = widget_with(hook.clone());
    widget.show_free_text_view().await;

    let first = widget.submit_user_text("first").await.unwrap();
    let second = widget.submit_user_text("second").await.unwrap();
    assert_eq!(widget.panel().await.pending, 2);

    second_gate.notify_one();
    second.join().await;
    assert_eq!(widget.panel().await.pending, 1);

    first_gate.notify_one();
    first.join().await;

    let panel = widget.panel().await;
    assert_eq!(panel.pending, 0);
    let texts: Vec<_> = panel.bubbles().map(|b| b.text.as_str()).collect();
    assert_eq!(texts, ["first", "second", "re:second", "re:first"]);
}

#[tokio::test]
async fn failed_delivery_leaves_only_the_user_bubble() {
    let hook = FakeWebhook::new();
    hook.script_err(WebhookError::Status { code: 500, body: "boom".into() }).await;
    let widget = widget_with(hook.clone());
    widget.show_free_text_view().await;

    widget.submit_user_text("hi").await.unwrap().join().await;

    let panel = widget.panel().await;
    assert_eq!(panel.pending, 0);
    let texts: Vec<_> = panel.bubbles().map(|b| (b.side, b.text.as_str())).collect();
    assert_eq!(texts, [(Side::User, "hi")]);

    // The widget keeps working after a failure
    hook.script(vec![text("back")]).await;
    widget.submit_user_text("again").await.unwrap().join().await;
    assert_eq!(widget.panel().await.bubbles().last().unwrap().text, "back");
}

#[tokio::test]
async fn cancelled_dispatch_renders_nothing() {
    let hook = FakeWebhook::new();
    hook.script(vec![text("never")]).await;
    let _gate = hook.gate("/slow").await;
    let widget = widget_with(hook.clone());

    let handle = widget.dispatch("/slow".into()).await;
    handle.cancel();
    handle.join().await;

    let panel = widget.panel().await;
    assert_eq!(panel.pending, 0);
    assert_eq!(panel.bubbles().count(), 0);
}
