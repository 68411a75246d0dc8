//! Clipboard access for quillcraft.
//!
//! Wraps arboard. On Linux, copies go to both CLIPBOARD and PRIMARY
//! selections. When no system clipboard is reachable (headless session, no
//! display server) the text is kept in process so cut/copy/paste still work
//! inside the editor.

use anyhow::{anyhow, Result};
use quillcraft_logger as logger;

#[cfg(target_os = "linux")]
use arboard::{GetExtLinux, LinuxClipboardKind, SetExtLinux};

/// Clipboard handle owned by the application
pub struct Clipboard {
    system: Option<arboard::Clipboard>,
    /// Last text copied from this process
    local: Option<String>,
}

impl Clipboard {
    /// Connect to the system clipboard, falling back to in-process storage
    pub fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                logger::warn(format!(
                    "System clipboard unavailable, using in-process clipboard: {}",
                    e
                ));
                None
            }
        };
        Self {
            system,
            local: None,
        }
    }

    /// Clipboard that never touches the system clipboard
    pub fn in_memory() -> Self {
        Self {
            system: None,
            local: None,
        }
    }

    /// Put text on the clipboard.
    ///
    /// The in-process copy is always updated; a system clipboard failure is
    /// returned after that so the text is not lost.
    pub fn copy(&mut self, text: &str) -> Result<()> {
        self.local = Some(text.to_string());

        let Some(clipboard) = self.system.as_mut() else {
            return Ok(());
        };

        #[cfg(target_os = "linux")]
        {
            clipboard
                .set()
                .clipboard(LinuxClipboardKind::Clipboard)
                .text(text.to_string())
                .map_err(|e| anyhow!("Failed to set clipboard text: {}", e))?;

            // PRIMARY is best effort (middle-click paste)
            let _ = clipboard
                .set()
                .clipboard(LinuxClipboardKind::Primary)
                .text(text.to_string());
        }

        #[cfg(not(target_os = "linux"))]
        clipboard
            .set_text(text)
            .map_err(|e| anyhow!("Failed to set clipboard text: {}", e))?;

        Ok(())
    }

    /// Read text from the clipboard.
    ///
    /// Returns `None` when neither the system clipboard nor the in-process
    /// copy holds text.
    pub fn paste(&mut self) -> Option<String> {
        self.system_text()
            .filter(|text| !text.is_empty())
            .or_else(|| self.local.clone())
    }

    #[cfg(target_os = "linux")]
    fn system_text(&mut self) -> Option<String> {
        let clipboard = self.system.as_mut()?;
        if let Ok(text) = clipboard
            .get()
            .clipboard(LinuxClipboardKind::Clipboard)
            .text()
        {
            if !text.is_empty() {
                return Some(text);
            }
        }
        clipboard
            .get()
            .clipboard(LinuxClipboardKind::Primary)
            .text()
            .ok()
    }

    #[cfg(not(target_os = "linux"))]
    fn system_text(&mut self) -> Option<String> {
        self.system.as_mut()?.get_text().ok()
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("system", &self.system.is_some())
            .field("local", &self.local)
            .finish()
    }
}
