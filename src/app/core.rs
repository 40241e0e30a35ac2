//! Core SimchatApp struct definition and initialization

use std::fs;
use std::path::PathBuf;
use std::thread;

use chrono::Local;
use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;

use crate::backend::run_backend;
use crate::buffer::{ChatMessage, MessageKind};
use crate::config::{load_settings, save_settings, Settings};
use crate::input_state::{ComposerState, MediaAttachment};
use crate::payload::{self, OutboundContent, AUDIO_MOCK_ID};
use crate::protocol::{BackendAction, GuiEvent};
use crate::state::{ChatStatus, ClientState};
use crate::ui::{ComposerOutput, SimchatTheme};
use crate::validation;

pub struct SimchatApp {
    // Core state (thread, carousels, presence, system log)
    pub state: ClientState,

    // Persisted settings (endpoint, phone, sidebar flag, history)
    pub settings: Settings,

    // Channels for backend communication
    pub action_tx: Sender<BackendAction>,
    pub event_rx: Receiver<GuiEvent>,

    // Composer state (message input, attachments, history)
    pub composer: ComposerState,

    // Sidebar collapse flag; persisted on toggle under the versioned key
    pub sidebar_collapsed: bool,
}

impl SimchatApp {
    /// Get the current theme based on the settings theme string.
    pub(super) fn get_theme(&self) -> SimchatTheme {
        match self.settings.theme.as_str() {
            "light" => SimchatTheme::light(),
            _ => SimchatTheme::dark(),
        }
    }

    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Create channels for UI <-> Backend
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();

        // Spawn the backend thread
        thread::spawn(move || {
            run_backend(action_rx, event_tx);
        });

        // Load persisted settings, falling back field by field when invalid
        let mut settings = load_settings().unwrap_or_default();
        if let Err(e) = validation::validate_endpoint_url(&settings.endpoint) {
            log::warn!("Ignoring saved endpoint: {}", e);
            settings.endpoint = Settings::default().endpoint;
        }
        if let Err(e) = validation::validate_phone_id(&settings.phone) {
            log::warn!("Ignoring saved phone id: {}", e);
            settings.phone = Settings::default().phone;
        }

        match settings.theme.as_str() {
            "light" => cc.egui_ctx.set_visuals(egui::Visuals::light()),
            _ => cc.egui_ctx.set_visuals(egui::Visuals::dark()),
        }

        let mut composer = ComposerState::new();
        composer.history = settings.history.clone();

        // Point the backend at the simulator; this starts the reply poll
        let _ = action_tx.send(BackendAction::Configure {
            endpoint: settings.endpoint.clone(),
            phone: settings.phone.clone(),
        });

        Self {
            state: ClientState::new(),
            sidebar_collapsed: settings.sidebar_collapsed,
            settings,
            action_tx,
            event_rx,
            composer,
        }
    }

    /// Persist the current settings (sidebar flag, history, endpoint).
    pub(super) fn save_settings_now(&self) {
        let mut settings = self.settings.clone();
        settings.sidebar_collapsed = self.sidebar_collapsed;
        settings.history = self.composer.history.clone();
        if let Err(e) = save_settings(&settings) {
            log::error!("Failed to save settings: {}", e);
        }
    }

    /// Flip the sidebar collapse flag and persist it immediately.
    pub(super) fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.save_settings_now();
    }

    /// Append the local bubble and hand the payload to the backend.
    fn send_outbound(&mut self, content: OutboundContent, bubble: MessageKind) {
        let ts = Local::now().format("%H:%M").to_string();
        self.state.thread.push(ChatMessage::sent(ts, bubble));
        let _ = self.action_tx.send(BackendAction::SendMessage(content));
    }

    /// Turn a composer action into a bubble plus an outbound payload.
    pub(super) fn handle_composer_output(&mut self, output: ComposerOutput) {
        match output {
            ComposerOutput::SendText(text) => {
                let text = validation::sanitize_message(&text);
                if let Err(e) = validation::validate_message(&text) {
                    self.state.push_status(e);
                    return;
                }
                self.composer.push_history(text.clone());
                self.state.chat_status = ChatStatus::Thinking;
                self.send_outbound(
                    OutboundContent::Text { body: text.clone() },
                    MessageKind::Text { body: text },
                );
            }

            ComposerOutput::SendLocation => {
                let latitude = self.settings.sim_latitude;
                let longitude = self.settings.sim_longitude;
                self.send_outbound(
                    OutboundContent::Location {
                        latitude,
                        longitude,
                    },
                    MessageKind::Location {
                        latitude,
                        longitude,
                    },
                );
            }

            ComposerOutput::SendMedia {
                kind,
                path,
                caption,
            } => {
                self.send_media(kind, path, caption);
            }

            ComposerOutput::SendAudio => {
                self.send_outbound(
                    OutboundContent::Audio {
                        id: AUDIO_MOCK_ID.to_string(),
                    },
                    MessageKind::Audio {
                        id: AUDIO_MOCK_ID.to_string(),
                    },
                );
            }
        }
    }

    fn send_media(&mut self, kind: MediaAttachment, path: String, caption: String) {
        let path_buf = PathBuf::from(&path);
        let bytes = match fs::read(&path_buf) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Failed to read media file {}: {}", path, e);
                self.state.push_status(format!("Cannot read {}", path));
                return;
            }
        };

        let mime = payload::guess_mime(&path_buf).to_string();
        let data = payload::media_data_url(&mime, &bytes);
        let caption = if caption.is_empty() {
            "Attached Media".to_string()
        } else {
            caption
        };
        let source = path_buf
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path.as_str())
            .to_string();

        let (content, bubble) = match kind {
            MediaAttachment::Image => (
                OutboundContent::Image {
                    id: payload::media_id(),
                    caption: caption.clone(),
                    mime_type: mime,
                    data,
                },
                MessageKind::Image { source, caption },
            ),
            MediaAttachment::Video => (
                OutboundContent::Video {
                    id: payload::media_id(),
                    caption: caption.clone(),
                    mime_type: mime,
                    data,
                },
                MessageKind::Video { source, caption },
            ),
        };
        self.send_outbound(content, bubble);
    }
}

impl Drop for SimchatApp {
    fn drop(&mut self) {
        let _ = self.action_tx.send(BackendAction::StopPolling);
        // Persist settings on exit
        self.save_settings_now();
    }
}
