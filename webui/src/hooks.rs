use std::future::Future;
use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::prelude::*;
use kopia_console_core::polling::{poll_until, PollControl};
use kopia_console_core::ApiError;
use tokio_util::sync::CancellationToken;

use crate::ui_utils::sleep;
use crate::Route;

/// Startet eine Abfrageschleife, die mit der Komponente endet.
pub fn use_polling<F, Fut>(interval: Duration, tick: F)
where
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = PollControl> + 'static,
{
    let cancel = use_hook(CancellationToken::new);
    use_drop({
        let cancel = cancel.clone();
        move || cancel.cancel()
    });
    use_hook(move || {
        spawn(async move {
            poll_until(interval, &cancel, tick, sleep).await;
        });
    });
}

/// Ohne Repository gibt es nur die Repository-Seite.
pub fn redirect_if_disconnected(nav: Navigator, err: &ApiError) -> bool {
    if err.is_not_connected() {
        nav.push(Route::Repository {});
        return true;
    }
    false
}
