//! Optional hold-open after the sync tool exits.

use std::io::{self, BufRead, IsTerminal, Write};

/// Wait for Enter when `enabled` and stdin is an interactive terminal.
///
/// Returns whether the runner actually paused. Unattended runs (no
/// terminal) never block here.
pub fn pause_on_exit(enabled: bool) -> bool {
    let stdin = io::stdin();
    if !enabled || !stdin.is_terminal() {
        return false;
    }
    wait_for_enter(stdin.lock(), io::stderr())
}

fn wait_for_enter<R: BufRead, W: Write>(mut input: R, mut prompt: W) -> bool {
    let _ = write!(prompt, "Press Enter to close...");
    let _ = prompt.flush();
    let mut line = String::new();
    input.read_line(&mut line).is_ok()
}
