// src/render.rs
//
// HTML view layer. Renders a `Panel` as plain forms so the widget works
// without client-side script. All text from users and the webhook is escaped.
//
// Late replies arrive through a meta refresh while dispatches are pending.
// A reload would discard a half-typed message, so the refresh is only emitted
// while the free-text input is hidden; otherwise the transcript ends with a
// link the user follows to pick up replies.

use std::fmt::Write;

use crate::{
    message::ReplyButton,
    services::faq::FaqCatalog,
    view::{Block, Bubble, Panel, Side},
};

pub const LAUNCHER_ID: &str = "billmart-chatbot-launcher";
pub const WINDOW_ID: &str = "billmart-chatbot-window";
pub const CLOSE_ID: &str = "billmart-chatbot-close";
pub const CONTENT_ID: &str = "billmart-chatbot-content";
pub const INPUT_ID: &str = "billmart-chatbot-input";
pub const INPUT_AREA_ID: &str = "billmart-chatbot-input-area";
/// Anchor after the last bubble; pages jump here to stay scrolled down.
pub const END_ANCHOR_ID: &str = "billmart-chatbot-end";

const MENU_PROMPT: &str = "What do you want to know?";
const TALK_LABEL: &str = "Talk with Chatbot";
const WAITING_LABEL: &str = "Waiting for a reply, tap to check";

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full host page: launcher plus the widget window.
pub fn render_page(widget_id: &str, panel: &Panel, faqs: &FaqCatalog) -> String {
    let base = format!("/w/{}", escape_html(widget_id));
    let refresh = if panel.pending > 0 && !panel.input_visible {
        format!(r#"<meta http-equiv="refresh" content="1;url={base}#{END_ANCHOR_ID}">"#)
    } else {
        String::new()
    };
    let window_display = if panel.visible { "block" } else { "none" };
    let input_display = if panel.input_visible { "" } else { "none" };
    let waiting = if panel.pending > 0 && panel.input_visible {
        format!(r#"<div class="waiting"><a href="{base}#{END_ANCHOR_ID}">{WAITING_LABEL}</a></div>"#)
    } else {
        String::new()
    };
    let content = render_content(&base, panel, faqs);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
{refresh}
<title>BillMart Assistant</title>
<style>
body{{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;margin:0}}
form{{margin:0}}
#{LAUNCHER_ID}{{position:fixed;right:24px;bottom:24px;width:56px;height:56px;border-radius:50%;border:none;background:#ff9100;color:#fff;font-size:24px;cursor:pointer}}
#{WINDOW_ID}{{position:fixed;right:24px;bottom:96px;width:340px;background:#fff;border-radius:12px;box-shadow:0 4px 24px rgba(0,0,0,.15);overflow:hidden}}
.header{{display:flex;justify-content:space-between;align-items:center;padding:12px 16px;background:#ff9100;color:#fff;font-weight:bold}}
#{CLOSE_ID}{{background:none;border:none;color:#fff;font-size:18px;cursor:pointer}}
#{CONTENT_ID}{{height:360px;overflow-y:auto;padding:12px 16px}}
.faq{{margin:4px 0;width:100%;padding:10px;border-radius:8px;border:1px solid #eee;background:#fff;cursor:pointer}}
.talk{{width:100%;padding:10px;border-radius:8px;background:#f5f5f5;border:1px solid #eee;cursor:pointer}}
.msg{{margin:8px 0}}
.msg span{{display:inline-block;padding:8px 12px;border-radius:12px;white-space:pre-wrap}}
.msg.user{{text-align:right}}
.msg.user span{{background:#ff9100;color:#fff}}
.msg.bot{{text-align:left}}
.msg.bot span{{background:#eee;color:#222}}
.waiting{{margin:8px 0;font-size:12px;color:#888}}
.quick{{margin:8px 0;display:flex;flex-wrap:wrap;gap:4px}}
.quick button{{padding:6px 12px;border-radius:8px;border:1px solid #ddd;background:#fff;cursor:pointer}}
#{INPUT_AREA_ID} form{{display:flex;gap:8px;padding:12px 16px;border-top:1px solid #eee}}
#{INPUT_ID}{{flex:1;padding:8px 12px;border:1px solid #ddd;border-radius:8px}}
</style>
</head>
<body>
<form method="post" action="{base}/open"><button id="{LAUNCHER_ID}" type="submit" title="Chat with us">&#128172;</button></form>
<div id="{WINDOW_ID}" style="display:{window_display}">
<div class="header"><span>BillMart Assistant</span><form method="post" action="{base}/close"><button id="{CLOSE_ID}" type="submit" title="Close">&times;</button></form></div>
<div id="{CONTENT_ID}">
{content}{waiting}<div id="{END_ANCHOR_ID}"></div>
</div>
<div id="{INPUT_AREA_ID}" style="display:{input_display}">
<form method="post" action="{base}/send"><input id="{INPUT_ID}" name="message" type="text" autocomplete="off" placeholder="Type a message..." autofocus><button type="submit">Send</button></form>
</div>
</div>
</body>
</html>"##
    )
}

/// Inner HTML of the content container.
pub fn render_content(base: &str, panel: &Panel, faqs: &FaqCatalog) -> String {
    let mut out = String::new();
    for (index, block) in panel.content.iter().enumerate() {
        match block {
            Block::FaqMenu => render_faq_menu(&mut out, base, faqs),
            Block::Bubble(bubble) => render_bubble(&mut out, base, index, bubble),
        }
    }
    out
}

fn render_faq_menu(out: &mut String, base: &str, faqs: &FaqCatalog) {
    let _ = writeln!(out, r#"<div style="margin-bottom:12px;font-weight:bold;">{MENU_PROMPT}</div>"#);
    for faq in faqs.entries() {
        let _ = writeln!(
            out,
            r#"<form method="post" action="{base}/select"><input type="hidden" name="payload" value="{}"><button class="faq" type="submit">{}</button></form>"#,
            escape_html(&faq.payload),
            escape_html(&faq.title),
        );
    }
    let _ = writeln!(
        out,
        r#"<div style="margin-top:16px;"><form method="post" action="{base}/talk"><button class="talk" type="submit">{TALK_LABEL}</button></form></div>"#
    );
}

fn render_bubble(out: &mut String, base: &str, index: usize, bubble: &Bubble) {
    let class = match bubble.side {
        Side::User => "user",
        Side::Bot => "bot",
    };
    let _ = writeln!(
        out,
        r#"<div class="msg {class}"><span>{}</span></div>"#,
        escape_html(&bubble.text)
    );
    if bubble.side == Side::Bot && !bubble.buttons.is_empty() {
        render_quick_replies(out, base, index, &bubble.buttons);
    }
}

fn render_quick_replies(out: &mut String, base: &str, index: usize, buttons: &[ReplyButton]) {
    out.push_str(r#"<div class="quick">"#);
    for (n, button) in buttons.iter().enumerate() {
        let _ = write!(
            out,
            r#"<form method="post" action="{base}/reply"><input type="hidden" name="bubble" value="{index}"><input type="hidden" name="button" value="{n}"><button type="submit">{}</button></form>"#,
            escape_html(&button.title)
        );
    }
    out.push_str("</div>\n");
}
