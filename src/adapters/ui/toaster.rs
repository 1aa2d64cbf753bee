//! Toasts as colored terminal lines, tracked by id until deleted.

use crate::domain::MessageId;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{Write, stdout};
use std::time::Duration;
use tracing::debug;

#[derive(Default)]
pub struct Toaster {
    active: Mutex<HashMap<MessageId, String>>,
}

impl Toaster {
    /// Print an info toast and remember it. `duration` is advisory on a terminal.
    pub fn info(&self, message: &str, duration: Duration) -> MessageId {
        let id = MessageId::generate();
        print_line(Color::Cyan, "[i]", message);
        debug!(%id, ?duration, "toast shown");
        self.active.lock().insert(id.clone(), message.to_string());
        id
    }

    pub fn error(&self, message: &str) {
        print_line(Color::Red, "[!]", message);
    }

    pub fn delete(&self, id: &MessageId) {
        if self.active.lock().remove(id).is_some() {
            debug!(%id, "toast deleted");
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.lock().len()
    }
}

fn print_line(color: Color, tag: &str, message: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(format!("{tag} {message}\r\n")));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
