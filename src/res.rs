//! Embedded page templates and the tiny string-replacement renderer the
//! pages share.

use crate::forms::FieldErrors;
use crate::models::{MessageItem, RoomItem, TopicItem};

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn notices(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| format!("<p class=\"notice\">{}</p>\n", escape(line)))
        .collect()
}

pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .0
        .iter()
        .map(|(field, message)| {
            format!("<p class=\"notice\">{field}: {}</p>\n", escape(message))
        })
        .collect()
}

pub fn room_items(rooms: &[RoomItem]) -> String {
    rooms
        .iter()
        .map(|room| {
            include_res!(str, "/pages/room_item.html")
                .replace("{id}", &room.id)
                .replace("{name}", &escape(&room.name))
                .replace("{topic_name}", &escape(&room.topic_name))
                .replace("{host_id}", &room.host_id)
                .replace("{host_username}", &escape(&room.host_username))
                .replace("{created_at}", &room.created_at)
        })
        .collect()
}

pub fn message_items(messages: &[MessageItem]) -> String {
    messages
        .iter()
        .map(|msg| {
            include_res!(str, "/pages/message_item.html")
                .replace("{id}", &msg.id)
                .replace("{body}", &escape(&msg.body))
                .replace("{user_id}", &msg.user_id)
                .replace("{username}", &escape(&msg.username))
                .replace("{room_id}", &msg.room_id)
                .replace("{room_name}", &escape(&msg.room_name))
                .replace("{created_at}", &msg.created_at)
        })
        .collect()
}

/// `<datalist>` options for the topic field on the room form.
pub fn topic_options(topics: &[TopicItem]) -> String {
    topics
        .iter()
        .map(|topic| format!("<option value=\"{}\">\n", escape(&topic.name)))
        .collect()
}

pub fn topic_items(topics: &[TopicItem]) -> String {
    topics
        .iter()
        .map(|topic| {
            include_res!(str, "/pages/topic_item.html")
                .replace("{name}", &escape(&topic.name))
                .replace("{room_count}", &topic.room_count.to_string())
        })
        .collect()
}
