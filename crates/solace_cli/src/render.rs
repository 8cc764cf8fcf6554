//! Terminal rendering of history entries and quick-action offers.

use solace_core::{HistoryEntry, QuickAction, Renderer, Speaker};

pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn display_entry(&mut self, entry: &HistoryEntry) {
        match entry.speaker {
            // User entries are echoes of what was just typed; re-printing
            // them in a terminal would duplicate the input line.
            Speaker::User => {}
            Speaker::Assistant => println!("\nSolace: {}\n", entry.text),
            Speaker::Suggestion => println!("\n✨ {}\n", entry.text),
        }
    }

    fn offer_quick_actions(&mut self, actions: &[QuickAction]) {
        println!("Quick actions (type a number, or just keep talking):");
        for (i, action) in actions.iter().enumerate() {
            println!("  {}. {}", i + 1, action.label());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_accepts_all_speakers() {
        let mut renderer = TerminalRenderer;
        renderer.display_entry(&HistoryEntry::user("hi"));
        renderer.display_entry(&HistoryEntry::assistant("hello"));
        renderer.display_entry(&HistoryEntry::suggestion("try this"));
        renderer.offer_quick_actions(&[QuickAction::Story, QuickAction::Song]);
    }
}
