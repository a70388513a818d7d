//! Window and WebView lifecycle
//!
//! One window, one WebView filling it, one message channel. Messages from
//! the page arrive on the IPC handler, which only forwards them to the event
//! loop; replies are evaluated in the page from there.

use std::path::{Path, PathBuf};
use url::Url;

use crate::bridge::dispatch_script;
use crate::config::ShellConfig;
use crate::error::Result;
use crate::message::Responder;
use crate::paths;

/// Title of the warning shown for a malformed message
pub const PARSE_ERROR_TITLE: &str = "JSON parse error";

/// Everything needed to open the window, with paths already resolved
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub background: (u8, u8, u8, u8),
    pub icon: Option<PathBuf>,
    pub entry: Url,
    pub data_dir: PathBuf,
    pub devtools: bool,
}

impl LaunchPlan {
    /// Resolve config paths against `base` (normally the executable directory)
    pub fn from_config(config: &ShellConfig, base: &Path) -> Result<Self> {
        let entry = paths::entry_url(&paths::resolve(base, &config.webview.entry))?;

        Ok(Self {
            title: config.window.title.clone(),
            width: config.window.width,
            height: config.window.height,
            resizable: config.window.resizable,
            background: config.background_rgba(),
            icon: config.window.icon.as_deref().map(|p| paths::resolve(base, p)),
            entry,
            data_dir: paths::resolve(base, &config.webview.data_dir),
            devtools: config.webview.devtools,
        })
    }
}

/// What the event loop should do with one message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpcOutcome {
    /// Script to evaluate in the page
    Reply(String),
    /// Message could not be read; shown to the user as a warning
    Malformed(String),
}

pub fn handle_ipc(responder: &Responder, body: &str) -> IpcOutcome {
    match responder.respond(body) {
        Ok(reply) => IpcOutcome::Reply(dispatch_script(&reply)),
        Err(e) => {
            tracing::error!(error = %e, "failed to parse message");
            IpcOutcome::Malformed(e.to_string())
        }
    }
}

// ============================================
// Native implementation
// ============================================

#[cfg(feature = "native")]
mod native_impl {
    use super::{handle_ipc, IpcOutcome, LaunchPlan, PARSE_ERROR_TITLE};
    use crate::bridge::INIT_SCRIPT;
    use crate::dialog::{self, MessageLevel};
    use crate::error::Result;
    use crate::message::Responder;
    use std::path::Path;
    use tao::{
        event::{Event, WindowEvent},
        event_loop::{ControlFlow, EventLoopBuilder},
        window::{Window, WindowBuilder},
    };
    use wry::dpi::{PhysicalPosition, PhysicalSize};
    use wry::{Rect, WebContext, WebView, WebViewBuilder};

    /// Events posted into the loop from WebView callbacks
    #[derive(Debug)]
    enum UserEvent {
        Message(String),
    }

    /// Open the window and run until it is closed
    pub fn run(plan: LaunchPlan) -> Result<()> {
        crate::runtime::check_runtime()?;

        let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
        let proxy = event_loop.create_proxy();

        let mut builder = WindowBuilder::new()
            .with_title(&plan.title)
            .with_inner_size(tao::dpi::LogicalSize::new(plan.width as f64, plan.height as f64))
            .with_resizable(plan.resizable);

        if let Some(ref icon_path) = plan.icon {
            match load_icon(icon_path) {
                Ok(icon) => builder = builder.with_window_icon(Some(icon)),
                Err(e) => tracing::warn!(path = %icon_path.display(), error = %e, "failed to load icon"),
            }
        }

        let window = builder.build(&event_loop)?;

        let mut web_context = WebContext::new(Some(plan.data_dir.clone()));
        tracing::info!(uri = %plan.entry, "loading entry page");

        let builder = WebViewBuilder::with_web_context(&mut web_context)
            .with_url(plan.entry.as_str())
            .with_bounds(client_rect(&window))
            .with_devtools(plan.devtools)
            .with_background_color(plan.background)
            .with_initialization_script(INIT_SCRIPT)
            .with_ipc_handler(move |req: wry::http::Request<String>| {
                if proxy.send_event(UserEvent::Message(req.into_body())).is_err() {
                    tracing::warn!("event loop closed, dropping message");
                }
            });

        let webview = build_webview(builder, &window)?;
        tracing::info!("WebView ready");

        let responder = Responder::new();

        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Wait;
            // Keeps the data directory alive as long as the WebView
            let _ = &web_context;

            match event {
                Event::WindowEvent { event: WindowEvent::CloseRequested, .. } => {
                    tracing::info!("window closed");
                    *control_flow = ControlFlow::Exit;
                }
                Event::WindowEvent { event: WindowEvent::Resized(size), .. } => {
                    if let Err(e) = webview.set_bounds(Rect {
                        position: PhysicalPosition::new(0, 0).into(),
                        size: PhysicalSize::new(size.width, size.height).into(),
                    }) {
                        tracing::warn!(error = %e, "failed to resize WebView");
                    }
                }
                Event::UserEvent(UserEvent::Message(body)) => match handle_ipc(&responder, &body) {
                    IpcOutcome::Reply(script) => {
                        if let Err(e) = webview.evaluate_script(&script) {
                            tracing::error!(error = %e, "failed to post reply");
                        }
                    }
                    IpcOutcome::Malformed(reason) => {
                        dialog::show(PARSE_ERROR_TITLE, &reason, MessageLevel::Warning);
                    }
                },
                _ => {}
            }
        });
    }

    fn client_rect(window: &Window) -> Rect {
        let size = window.inner_size();
        Rect {
            position: PhysicalPosition::new(0, 0).into(),
            size: PhysicalSize::new(size.width, size.height).into(),
        }
    }

    #[cfg(any(target_os = "windows", target_os = "macos"))]
    fn build_webview(builder: WebViewBuilder<'_>, window: &Window) -> Result<WebView> {
        Ok(builder.build(window)?)
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    fn build_webview(builder: WebViewBuilder<'_>, window: &Window) -> Result<WebView> {
        use crate::error::ShellError;
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;

        let vbox = window
            .default_vbox()
            .ok_or_else(|| ShellError::Window("window has no GTK container".to_string()))?;
        Ok(builder.build_gtk(vbox)?)
    }

    /// Load an icon from a PNG file
    fn load_icon(path: &Path) -> std::result::Result<tao::window::Icon, Box<dyn std::error::Error>> {
        use image::GenericImageView;
        use std::fs::File;
        use std::io::BufReader;

        let file = File::open(path)?;
        let img = image::load(BufReader::new(file), image::ImageFormat::Png)?;
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8().into_raw();
        Ok(tao::window::Icon::from_rgba(rgba, width, height)?)
    }
}

#[cfg(feature = "native")]
pub use native_impl::run;

// ============================================
// Stubs for non-native builds
// ============================================

#[cfg(not(feature = "native"))]
pub fn run(_plan: LaunchPlan) -> Result<()> {
    Err(crate::error::ShellError::NativeDisabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("ui")).unwrap();
        std::fs::write(dir.path().join("ui/index.html"), "<html></html>").unwrap();
        dir
    }

    #[test]
    fn test_plan_from_defaults() {
        let dir = project();
        let plan = LaunchPlan::from_config(&ShellConfig::default(), dir.path()).unwrap();

        assert_eq!(plan.title, "WebView on Rust");
        assert_eq!((plan.width, plan.height), (1280, 720));
        assert_eq!(plan.background, (255, 255, 255, 255));
        assert!(plan.devtools);
        assert!(plan.icon.is_none());
        assert_eq!(plan.data_dir, dir.path().join("WebView2Data"));
        assert!(plan.entry.path().ends_with("/ui/index.html"));
    }

    #[test]
    fn test_plan_requires_entry() {
        let dir = tempfile::tempdir().unwrap();
        let err = LaunchPlan::from_config(&ShellConfig::default(), dir.path()).unwrap_err();
        assert!(matches!(err, ShellError::EntryNotFound(_)));
    }

    #[test]
    fn test_plan_resolves_icon() {
        let dir = project();
        let config = ShellConfig::parse("[window]\nicon = \"assets/app.png\"").unwrap();
        let plan = LaunchPlan::from_config(&config, dir.path()).unwrap();
        assert_eq!(plan.icon, Some(dir.path().join("assets/app.png")));
    }

    #[test]
    fn test_handle_ipc_reply() {
        let responder = Responder::new();
        match handle_ipc(&responder, r#"{"type":"ping","payload":"hello from js"}"#) {
            IpcOutcome::Reply(script) => {
                assert!(script.contains("__dispatch("));
                assert!(script.contains(r#""type":"pong""#));
                assert!(script.contains(r#""receivedType":"ping""#));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_handle_ipc_encoded_string_is_malformed() {
        let responder = Responder::new();
        for body in [r#""{\"type\":\"ping\"}""#, "null"] {
            match handle_ipc(&responder, body) {
                IpcOutcome::Malformed(reason) => assert_eq!(reason, "Message is not a JSON object"),
                other => panic!("unexpected outcome for {}: {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_handle_ipc_malformed() {
        let responder = Responder::new();
        match handle_ipc(&responder, "not json") {
            IpcOutcome::Malformed(reason) => assert!(reason.starts_with("Invalid JSON")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
