use std::io::Write;

use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permission {
    Undetermined,
    Granted,
    Denied,
}

/// Something that can show desktop notifications and owns the permission for it.
pub trait DesktopPlatform {
    fn permission(&self) -> Permission;

    /// Ask for permission. Only called while `permission()` is `Undetermined`.
    fn request_permission(&mut self) -> Permission;

    fn show(&mut self, title: &str, body: &str) -> std::io::Result<()>;
}

/// Delivers notices through a platform, asking for permission lazily.
///
/// Holds no permission state of its own; a denial is only remembered by the
/// platform.
pub struct DesktopNotifier<P: DesktopPlatform> {
    platform: P,
}

impl<P: DesktopPlatform> DesktopNotifier<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Returns whether the notice was shown.
    pub fn deliver(&mut self, title: &str, body: &str) -> bool {
        let permission = match self.platform.permission() {
            Permission::Undetermined => {
                let p = self.platform.request_permission();
                info!(permission = ?p, "desktop notification permission requested");
                p
            }
            p => p,
        };
        if permission != Permission::Granted {
            return false;
        }
        match self.platform.show(title, body) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "desktop notification failed");
                false
            }
        }
    }
}

/// Desktop notifications via the OSC 9 terminal escape.
///
/// Permission is fixed when configured; otherwise it is decided on the first
/// request from whether the terminal understands OSC 9.
pub struct OscDesktop<W: Write> {
    configured: Option<bool>,
    supported: bool,
    decided: Option<Permission>,
    out: W,
}

impl<W: Write> OscDesktop<W> {
    pub fn new(configured: Option<bool>, supported: bool, out: W) -> Self {
        Self {
            configured,
            supported,
            decided: None,
            out,
        }
    }

    pub fn requests_decided(&self) -> bool {
        self.decided.is_some()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl OscDesktop<std::io::Stdout> {
    pub fn stdout(configured: Option<bool>) -> Self {
        Self::new(configured, terminal_supports_osc9(), std::io::stdout())
    }
}

impl<W: Write> DesktopPlatform for OscDesktop<W> {
    fn permission(&self) -> Permission {
        match self.configured {
            Some(true) => Permission::Granted,
            Some(false) => Permission::Denied,
            None => self.decided.unwrap_or(Permission::Undetermined),
        }
    }

    fn request_permission(&mut self) -> Permission {
        let p = if self.supported {
            Permission::Granted
        } else {
            Permission::Denied
        };
        self.decided = Some(p);
        p
    }

    fn show(&mut self, title: &str, body: &str) -> std::io::Result<()> {
        let payload = format!("\x1b]9;{}: {}\x07", sanitize(title), sanitize(body));
        self.out.write_all(payload.as_bytes())?;
        self.out.flush()
    }
}

fn sanitize(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

fn terminal_supports_osc9() -> bool {
    let program = std::env::var("TERM_PROGRAM").unwrap_or_default();
    let term = std::env::var("TERM").unwrap_or_default();
    matches!(
        program.as_str(),
        "iTerm.app" | "WezTerm" | "ghostty" | "vscode"
    ) || term.contains("kitty")
        || term.contains("foot")
}
