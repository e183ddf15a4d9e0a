pub mod dispatch;
pub mod faq;
pub mod registry;
pub mod session;
pub mod webhook;
pub mod widget;
