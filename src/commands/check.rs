use crate::app::checks::do_checks;

/// Script-mode self check: exits 1 through `die` if something is missing,
/// 0 otherwise. Runs before any bootstrap, so there is no context to take.
pub fn self_check() -> ! {
    do_checks();
    std::process::exit(0)
}
