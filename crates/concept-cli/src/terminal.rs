//! Line-oriented terminal host.
//!
//! Notifications and status go to stderr, selections are numbered menus
//! answered on stdin. Stdin is shared between the chat loop and the picker,
//! so both read through [`TerminalUi::read_line`].

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use concept_core::{HostUi, Severity, StatusStyle, StatusText};

/// Terminal implementation of [`HostUi`].
pub struct TerminalUi<R> {
    lines: Mutex<Lines<R>>,
}

impl TerminalUi<BufReader<Stdin>> {
    /// Host reading from the process's stdin.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin + Send> TerminalUi<R> {
    /// Host reading from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }

    /// Next input line, `None` at end of input.
    pub async fn read_line(&self) -> std::io::Result<Option<String>> {
        self.lines.lock().await.next_line().await
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> HostUi for TerminalUi<R> {
    fn notify(&self, message: &str, severity: Severity) {
        eprintln!("[{severity}] {message}");
    }

    fn set_status(&self, label: &str, text: Option<StatusText>) {
        match text {
            Some(text) => eprintln!("[status:{label}] {}", render_status(&text)),
            None => eprintln!("[status:{label}] (cleared)"),
        }
    }

    async fn select(&self, prompt: &str, options: &[String]) -> Option<String> {
        eprintln!("{}", render_menu(prompt, options));
        let line = match self.read_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(error) => {
                tracing::warn!(%error, "failed to read selection");
                return None;
            }
        };
        parse_selection(&line, options)
    }
}

/// Numbered menu for `options`.
pub fn render_menu(prompt: &str, options: &[String]) -> String {
    let mut menu = prompt.to_string();
    for (i, option) in options.iter().enumerate() {
        menu.push_str(&format!("\n  {}) {option}", i + 1));
    }
    menu.push_str("\nNumber (empty to cancel):");
    menu
}

/// Map a 1-based menu answer to its option. Anything else cancels.
pub fn parse_selection(input: &str, options: &[String]) -> Option<String> {
    let index: usize = input.trim().parse().ok()?;
    index.checked_sub(1).and_then(|i| options.get(i)).cloned()
}

/// Status text with ANSI color for its style.
pub fn render_status(text: &StatusText) -> String {
    match text.style {
        StatusStyle::Plain => text.text.clone(),
        StatusStyle::Success => format!("\x1b[32m{}\x1b[0m", text.text),
        StatusStyle::Dim => format!("\x1b[2m{}\x1b[0m", text.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["○ alpha".to_string(), "● beta".to_string()]
    }

    #[test]
    fn test_render_menu_numbers_options() {
        let menu = render_menu("Toggle concept:", &options());
        assert!(menu.starts_with("Toggle concept:"));
        assert!(menu.contains("1) ○ alpha"));
        assert!(menu.contains("2) ● beta"));
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("2", &options()).as_deref(), Some("● beta"));
        assert_eq!(parse_selection(" 1 ", &options()).as_deref(), Some("○ alpha"));
        assert!(parse_selection("", &options()).is_none());
        assert!(parse_selection("0", &options()).is_none());
        assert!(parse_selection("3", &options()).is_none());
        assert!(parse_selection("beta", &options()).is_none());
    }

    #[test]
    fn test_render_status_styles() {
        assert_eq!(render_status(&StatusText::plain("x")), "x");
        assert_eq!(
            render_status(&StatusText::success("x")),
            "\x1b[32mx\x1b[0m"
        );
    }

    #[tokio::test]
    async fn test_select_reads_answer_from_input() {
        let ui = TerminalUi::new(BufReader::new(&b"2\nnext line\n"[..]));
        let picked = ui.select("Pick:", &options()).await;
        assert_eq!(picked.as_deref(), Some("● beta"));
        assert_eq!(ui.read_line().await.unwrap().as_deref(), Some("next line"));
        assert!(ui.read_line().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_select_at_end_of_input_cancels() {
        let ui = TerminalUi::new(BufReader::new(&b""[..]));
        assert!(ui.select("Pick:", &options()).await.is_none());
    }
}
