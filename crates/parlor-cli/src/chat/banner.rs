//! Welcome banner for the chat loop.

use console::style;
use uuid::Uuid;

use crate::bootstrap::Session;

/// Print the session banner: model, feature set, and the exit hints.
pub fn print_welcome(session: &Session, session_id: &Uuid) {
    let feature_label = if session.memory_enabled {
        "chat + memory"
    } else {
        "chat"
    };

    println!();
    println!(
        "  {} {} {}",
        style("Parlor").cyan().bold(),
        style("·").dim(),
        style(feature_label).dim()
    );
    println!(
        "  {} {}  {} {}",
        style("model").dim(),
        style(&session.model).cyan(),
        style("session").dim(),
        style(session_id).dim()
    );
    println!(
        "  {}",
        style("Type 'exit' to terminate, Ctrl+D to end the session.").dim()
    );
    println!();
}
