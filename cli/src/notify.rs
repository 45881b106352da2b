use daytrack_core::scheduler::Notifier;

/// Terminal notification channel. There is no OS-level channel to lose here,
/// so the in-process banner is both the primary path and the fallback; by
/// contract it never fails the caller.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, title: &str, body: &str) {
        eprintln!();
        eprintln!("=== {title} ===");
        eprintln!("{body}");
        eprintln!();
    }
}
