use dioxus::prelude::*;
use dioxus_router::prelude::*;

mod api;
mod components;
mod hooks;
mod pages;
mod prefs;
mod ui_utils;

use pages::browse::DirBrowser;
use pages::history::SnapshotHistory;
use pages::policies::Policies;
use pages::policy_editor::PolicyEdit;
use pages::preferences::Preferences;
use pages::repo::Repository;
use pages::restore::Restore;
use pages::sources::{NewSnapshot, Snapshots};
use pages::tasks::{TaskDetails, Tasks};

// ----- Routing -----
#[derive(Routable, Clone, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[redirect("/", || Route::Snapshots {})]
        #[route("/snapshots")]
        Snapshots {},
        #[route("/snapshots/new")]
        NewSnapshot {},
        #[route("/snapshots/single-source?:user_name&:host&:path")]
        SnapshotHistory { user_name: String, host: String, path: String },
        #[route("/snapshots/dir/:oid?:label")]
        DirBrowser { oid: String, label: String },
        #[route("/snapshots/restore/:oid?:label")]
        Restore { oid: String, label: String },
        #[route("/policies")]
        Policies {},
        #[route("/policies/edit?:user_name&:host&:path")]
        PolicyEdit { user_name: String, host: String, path: String },
        #[route("/tasks")]
        Tasks {},
        #[route("/tasks/:tid")]
        TaskDetails { tid: String },
        #[route("/repo")]
        Repository {},
        #[route("/preferences")]
        Preferences {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

pub fn main() {
    console_error_panic_hook::set_once();
    dioxus_web::launch::launch(app, vec![], Default::default());
}

fn app() -> Element {
    rsx! {
        div { // root wrapper
            Router::<Route> {}
            // Toast container for notifications
            div { id: "toasts", class: "toast-container" }
        }
    }
}

// ----- Layout: Kopfzeile + Seite -----
#[component]
fn Shell() -> Element {
    prefs::use_prefs_provider();
    rsx! {
        div { class: "app-header",
            div { class: "container",
                div { class: "brand",
                    span { "Kopia Console" }
                }
                nav {
                    Link { to: Route::Snapshots {}, "Snapshots" }
                    Link { to: Route::Policies {}, "Policies" }
                    Link { to: Route::Tasks {}, "Tasks" }
                    Link { to: Route::Repository {}, "Repository" }
                    Link { to: Route::Preferences {}, "Preferences" }
                }
            }
        }
        main { class: "container",
            Outlet::<Route> {}
        }
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        section { class: "panel",
            h2 { "Page not found" }
            p { class: "muted", "/{path}" }
            Link { to: Route::Snapshots {}, "Back to snapshots" }
        }
    }
}
