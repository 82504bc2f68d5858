use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static CHAINED: AtomicUsize = AtomicUsize::new(0);

#[test]
fn test_panic_hook_chains_previous_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {
        CHAINED.fetch_add(1, Ordering::SeqCst);
    }));
    install_panic_hook();

    let before = CHAINED.load(Ordering::SeqCst);
    let result = std::panic::catch_unwind(|| panic!("boom"));
    assert!(result.is_err());
    assert!(CHAINED.load(Ordering::SeqCst) > before);

    let _ = std::panic::take_hook();
    std::panic::set_hook(original);
}
