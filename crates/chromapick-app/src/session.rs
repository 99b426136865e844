//! A picker session: one engine plus the host-side state around it.

use crate::clipboard;
use crate::commands::{Command, CommandRegistry};
use chromapick_core::{ColorEngine, ImageRef, KeyEvent, PickerConfig, PickerListeners};
use std::cell::RefCell;
use std::rc::Rc;

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// Drives a [`ColorEngine`] from host commands.
///
/// In controlled mode the session plays the host that owns the color: it
/// records what the engine reports through `on_change` and pushes it back
/// with `set_color` once the command finishes.
pub struct Session {
    engine: ColorEngine,
    pending: Option<Rc<RefCell<Option<String>>>>,
    // Keeps key and icon events flowing for the session's lifetime.
    _listeners: PickerListeners,
}

impl Session {
    pub fn new(config: PickerConfig, controlled: bool) -> Self {
        let builder = ColorEngine::builder(config);
        let (engine, pending) = if controlled {
            let pending = Rc::new(RefCell::new(None));
            let sink = pending.clone();
            let engine = builder
                .on_change(move |color| *sink.borrow_mut() = Some(color.to_string()))
                .build();
            (engine, Some(pending))
        } else {
            (builder.build(), None)
        };

        let listeners = engine.attach_listeners();
        log::info!(
            "Session started for picker {} ({})",
            engine.id(),
            if controlled { "controlled" } else { "uncontrolled" }
        );
        Self {
            engine,
            pending,
            _listeners: listeners,
        }
    }

    pub fn engine(&self) -> &ColorEngine {
        &self.engine
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        let message = match command {
            Command::Adjust(kind, raw) => {
                self.engine.handle_input(kind, &raw);
                None
            }
            Command::Select(color) => {
                (!self.engine.select_swatch(&color)).then(|| format!("Rejected color {color}"))
            }
            Command::Hover(color) => {
                (!self.engine.hover_swatch(&color)).then(|| "Hover ignored".to_string())
            }
            Command::SetColor(color) => {
                (!self.engine.set_color(&color)).then(|| format!("Rejected color {color}"))
            }
            Command::Random(count) => {
                let requested = count.unwrap_or(self.engine.random_swatch_count());
                let collected = self.engine.generate_random_swatches(requested);
                (collected < requested)
                    .then(|| format!("Only {collected} distinct colors of {requested}"))
            }
            Command::Shades => {
                self.engine.generate_shades();
                None
            }
            Command::Tints => {
                self.engine.generate_tints();
                None
            }
            Command::Show(mode) => {
                self.engine.set_display_mode(mode);
                None
            }
            Command::Reset => {
                self.engine.reset();
                None
            }
            Command::Image(path) => (!self.engine.load_image(ImageRef::Path(path)))
                .then(|| "No swatches extracted".to_string()),
            Command::ClearImage => {
                self.engine.clear_image();
                None
            }
            Command::Key(key) => {
                self.engine.handle_key(&KeyEvent::pressed(key));
                None
            }
            Command::Icon => Some(if self.engine.handle_image_icon_click() {
                "Upload an image with `image <path>`".to_string()
            } else {
                "Image icon is not active".to_string()
            }),
            Command::Format(format) => {
                self.engine.set_format(format);
                None
            }
            Command::Copy => {
                let text = self.engine.formatted();
                Some(match clipboard::copy_text(&text) {
                    Ok(()) => format!("Copied {text}"),
                    Err(e) => {
                        log::error!("Failed to copy: {}", e);
                        format!("{text} ({e})")
                    }
                })
            }
            Command::State => Some(
                serde_json::to_string_pretty(self.engine.state())
                    .unwrap_or_else(|e| format!("Failed to serialize state: {e}")),
            ),
            Command::Help => return Outcome::Continue(CommandRegistry::format_help()),
            Command::Quit => return Outcome::Quit,
        };

        self.sync_controlled();

        let mut out = self.describe();
        if let Some(message) = message {
            out = format!("{message}\n{out}");
        }
        Outcome::Continue(out)
    }

    /// Push the color reported through `on_change` back into the engine.
    fn sync_controlled(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let reported = pending.borrow_mut().take();
        if let Some(color) = reported {
            self.engine.set_color(&color);
        }
    }

    /// One-screen summary of the picker.
    pub fn describe(&self) -> String {
        let engine = &self.engine;
        let swatches = engine.displayed_swatches();
        let adjusted = if engine.state().sliders.is_neutral() {
            ""
        } else {
            " (adjusted)"
        };
        format!(
            "color {} [{}: {}]{}\n{:?} swatches ({}): {}",
            engine.hex(),
            engine.format(),
            engine.formatted(),
            adjusted,
            engine.display_mode(),
            swatches.len(),
            swatches.colors().join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse;
    use chromapick_core::{AdjustmentKind, DisplayMode, MAX_RANDOM_SWATCHES};

    fn run(session: &mut Session, line: &str) -> Outcome {
        let command = parse(line).unwrap().unwrap();
        session.execute(command)
    }

    #[test]
    fn test_uncontrolled_session() {
        let mut session = Session::new(PickerConfig::default(), false);
        run(&mut session, "lighten 20");
        run(&mut session, "lighten 10");
        assert_eq!(session.engine().hex(), "#0ab7d6");

        run(&mut session, "select #f6546a");
        assert_eq!(session.engine().hex(), "#f6546a");
        assert_eq!(session.engine().slider(AdjustmentKind::Lighten), 0);
    }

    #[test]
    fn test_describe_marks_adjusted_color() {
        let mut session = Session::new(PickerConfig::default(), false);
        assert!(!session.describe().contains("(adjusted)"));
        run(&mut session, "darken 15");
        assert!(session.describe().contains("(adjusted)"));
        run(&mut session, "select #40e0d0");
        assert!(!session.describe().contains("(adjusted)"));
    }

    #[test]
    fn test_large_random_request_does_not_panic() {
        let mut session = Session::new(PickerConfig::default(), false);
        run(&mut session, "random 100000000000");
        assert!(session.engine().displayed_swatches().len() <= MAX_RANDOM_SWATCHES);
    }

    #[test]
    fn test_controlled_session_round_trips_color() {
        let mut session = Session::new(PickerConfig::default(), true);
        assert!(session.engine().is_controlled());

        run(&mut session, "select #f6546a");
        assert_eq!(session.engine().hex(), "#f6546a");

        run(&mut session, "lighten 20");
        let first = session.engine().hex();
        run(&mut session, "lighten 0");
        assert_eq!(session.engine().hex(), "#f6546a");
        assert_ne!(first, "#f6546a");
    }

    #[test]
    fn test_palette_commands() {
        let mut session = Session::new(PickerConfig::default(), false);
        run(&mut session, "shades");
        assert_eq!(session.engine().display_mode(), DisplayMode::Shades);
        run(&mut session, "tints");
        run(&mut session, "show shades");
        assert_eq!(session.engine().display_mode(), DisplayMode::Shades);
        run(&mut session, "reset");
        assert_eq!(session.engine().display_mode(), DisplayMode::Base);
    }

    #[test]
    fn test_rejected_color_is_reported() {
        let mut session = Session::new(PickerConfig::default(), false);
        match run(&mut session, "select nonsense") {
            Outcome::Continue(out) => assert!(out.starts_with("Rejected color nonsense")),
            Outcome::Quit => panic!("unexpected quit"),
        }
        assert_eq!(session.engine().hex(), "#088da5");
    }

    #[test]
    fn test_listeners_active_for_session() {
        let mut session = Session::new(PickerConfig::default(), false);
        match run(&mut session, "icon") {
            Outcome::Continue(out) => assert!(out.starts_with("Upload an image")),
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_missing_image_keeps_swatches() {
        let mut session = Session::new(PickerConfig::default(), false);
        run(&mut session, "image /no/such/image.png");
        assert_eq!(session.engine().displayed_swatches().len(), 6);
        run(&mut session, "key Backspace");
        assert!(session.engine().image().is_none());
    }

    #[test]
    fn test_state_and_quit() {
        let mut session = Session::new(PickerConfig::default(), false);
        match run(&mut session, "state") {
            Outcome::Continue(out) => assert!(out.contains("\"original_input\": \"#088da5\"")),
            Outcome::Quit => panic!("unexpected quit"),
        }
        assert_eq!(run(&mut session, "quit"), Outcome::Quit);
    }
}
