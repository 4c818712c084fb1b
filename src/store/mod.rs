//! Per-entity query functions over the SQLite pool. Handlers never touch
//! SQL directly.

pub mod messages;
pub mod participants;
pub mod rooms;
pub mod topics;
pub mod users;


/// Wraps `q` for a case-insensitive contains match. `%`, `_` and the
/// escape character itself are escaped so user input matches literally;
/// the query side carries `ESCAPE '\'`.
pub(crate) fn like_contains(q: &str) -> String {
    let mut pattern = String::with_capacity(q.len() + 2);
    pattern.push('%');
    for c in q.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
