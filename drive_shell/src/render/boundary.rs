use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::navigation::NavigationState;
use crate::render::types::{Layout, ScreenResolver, View};
use crate::session::{SessionState, SessionStatus};

/// Picks the single view for the current navigation and session state.
///
/// A resolver error or panic never escapes: it becomes [`View::Recovery`],
/// whose only way out is back to welcome.
pub struct RenderBoundary;

impl RenderBoundary {
    pub fn render(
        resolver: &dyn ScreenResolver,
        nav: &NavigationState,
        session: &SessionState,
        awaiting_oauth: bool,
    ) -> View {
        // Nothing to show until the provider has consumed the redirect.
        if awaiting_oauth && session.status() == SessionStatus::Unknown {
            return View::Spinner;
        }

        let page = nav.current_page();
        let resolved = catch_unwind(AssertUnwindSafe(|| resolver.resolve(page, session.profile())));
        let descriptor = match resolved {
            Ok(Ok(descriptor)) => descriptor,
            Ok(Err(e)) => {
                tracing::error!(page = %page, error = %e, "Render error");
                return View::Recovery {
                    page: page.clone(),
                    message: e.message().to_string(),
                };
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(page = %page, panic = %message, "Screen panicked");
                return View::Recovery {
                    page: page.clone(),
                    message,
                };
            }
        };

        if descriptor.layout == Layout::Main && nav.is_loading() {
            return View::Spinner;
        }
        if descriptor.screen == "diagnostics" {
            return View::Diagnostics {
                error: nav.app_error().map(str::to_string),
            };
        }

        View::Screen {
            descriptor,
            payload: nav.pending_payload().cloned(),
            create_post_open: nav.create_post_open(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Screen panicked".to_string()
    }
}
