use super::Message;
use crate::config::Theme;
use crate::controller::codes::CommandCode;
use crate::controller::serial::{preferred_port, NativeDriver, BAUD_RATES};
use crate::controller::Controller;
use crate::model::{Connection, StatusLevel};
use egui::{Color32, Key, Layout, RichText};
use std::time::Instant;

const BUTTON_SIZE: [f32; 2] = [96., 24.];
const KEY_SIZE: [f32; 2] = [72., 24.];

const HOTKEYS: [(Key, u8); 15] = [
    (Key::M, b'M'),
    (Key::R, b'R'),
    (Key::P, b'P'),
    (Key::T, b'T'),
    (Key::S, b'S'),
    (Key::Num0, b'0'),
    (Key::Num1, b'1'),
    (Key::Num2, b'2'),
    (Key::Num3, b'3'),
    (Key::Num4, b'4'),
    (Key::Num5, b'5'),
    (Key::Num6, b'6'),
    (Key::Num7, b'7'),
    (Key::Num8, b'8'),
    (Key::Num9, b'9'),
];

const KEYPAD: [[u8; 3]; 3] = [[1, 2, 3], [4, 5, 6], [7, 8, 9]];

const MUTED: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);
const STATUS_OK: Color32 = Color32::from_rgb(0x27, 0xAE, 0x60);
const STATUS_IDLE: Color32 = Color32::from_rgb(0x9C, 0xA3, 0xAF);
const STATUS_ERR: Color32 = Color32::from_rgb(0xE7, 0x4C, 0x3C);
const KEYPAD_BLUE: Color32 = Color32::from_rgb(0x29, 0x80, 0xB9);

fn action_color(code: CommandCode) -> Color32 {
    match code {
        CommandCode::MicRecord => Color32::from_rgb(0xE7, 0x4C, 0x3C),
        CommandCode::RxRecord => Color32::from_rgb(0xE6, 0x7E, 0x22),
        CommandCode::Play => Color32::from_rgb(0x27, 0xAE, 0x60),
        CommandCode::Transmit => Color32::from_rgb(0xC0, 0x39, 0x2B),
        _ => KEYPAD_BLUE,
    }
}

pub struct App {
    controller: Controller<NativeDriver>,
    selected_port: String,
    baud: u32,
    applied_theme: Option<Theme>,
}

impl App {
    pub fn new(controller: Controller<NativeDriver>) -> Self {
        let preferences = controller.preferences().clone();
        let selected_port = match preferences.port {
            Some(port) => port,
            None => preferred_port(&controller.model().ports, std::env::consts::OS),
        };

        Self {
            controller,
            selected_port,
            baud: preferences.baud,
            applied_theme: None,
        }
    }

    fn apply_theme(self: &mut Self, ctx: &egui::Context) {
        let theme = self.controller.preferences().theme;
        if self.applied_theme != Some(theme) {
            ctx.set_visuals(match theme {
                Theme::Light => egui::Visuals::light(),
                Theme::Dark => egui::Visuals::dark(),
            });
            self.applied_theme = Some(theme);
        }
    }
}

fn hotkeys(ctx: &egui::Context, messages: &mut Vec<Message>) {
    let input = ctx.input();
    for &(key, byte) in &HOTKEYS {
        if input.key_pressed(key) {
            if let Ok(code) = CommandCode::try_from(byte) {
                messages.push(Message::Send(code));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.tick(Instant::now());
        self.apply_theme(ctx);

        let model = self.controller.model().clone();
        let mut theme = self.controller.preferences().theme;
        let mut messages: Vec<Message> = Vec::new();

        hotkeys(ctx, &mut messages);

        egui::TopBottomPanel::top(0).show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 6.;

            ui.horizontal(|ui| {
                ui.label("Port:");
                ui.add_enabled_ui(!model.is_connected(), |ui| {
                    egui::ComboBox::from_id_source("port")
                        .width(160.)
                        .selected_text(self.selected_port.as_str())
                        .show_ui(ui, |ui| {
                            for port in &model.ports {
                                ui.selectable_value(
                                    &mut self.selected_port,
                                    port.clone(),
                                    port.clone(),
                                );
                            }
                        });
                    if ui.small_button("⟳").clicked() {
                        messages.push(Message::RefreshPorts);
                    }

                    ui.label("Baud:");
                    egui::ComboBox::from_id_source("baud")
                        .width(80.)
                        .selected_text(self.baud.to_string())
                        .show_ui(ui, |ui| {
                            for baud in BAUD_RATES {
                                ui.selectable_value(&mut self.baud, baud, baud.to_string());
                            }
                        });
                });

                let open_label = if model.is_connected() { "Close" } else { "Open" };
                if ui.button(open_label).clicked() {
                    messages.push(match model.connection {
                        Connection::Connected(..) => Message::Disconnect,
                        Connection::Disconnected => {
                            Message::ConnectToPort(self.selected_port.clone(), self.baud)
                        }
                    });
                }
            });

            ui.horizontal(|ui| {
                ui.label(RichText::new("Status:").strong());
                let dot = match model.status.level {
                    StatusLevel::Ok => STATUS_OK,
                    StatusLevel::Idle => STATUS_IDLE,
                    StatusLevel::Error => STATUS_ERR,
                };
                ui.colored_label(dot, "●");
                ui.label(model.status.text.as_str());

                ui.separator();
                ui.colored_label(MUTED, "Command:");
                if let Some(cmd) = &model.last_command {
                    ui.label(format!("{} [{}]", cmd.text, cmd.timestamp));
                }

                ui.with_layout(Layout::right_to_left(), |ui| {
                    ui.selectable_value(&mut theme, Theme::Dark, "Dark");
                    ui.selectable_value(&mut theme, Theme::Light, "Light");
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    for code in CommandCode::ACTIONS {
                        let text = RichText::new(code.label()).color(Color32::WHITE).strong();
                        let button = egui::Button::new(text).fill(action_color(code));
                        if ui.add_sized(BUTTON_SIZE, button).clicked() {
                            messages.push(Message::Send(code));
                        }
                    }
                });

                ui.separator();

                ui.vertical(|ui| {
                    egui::Grid::new("keypad").show(ui, |ui| {
                        for row in KEYPAD {
                            for digit in row {
                                keypad_button(ui, digit, &mut messages);
                            }
                            ui.end_row();
                        }
                        ui.label("");
                        keypad_button(ui, 0, &mut messages);
                        ui.end_row();
                    });
                    ui.colored_label(MUTED, "Hotkeys: M R P T S, digits 0–9");
                });
            });
        });

        if theme != self.controller.preferences().theme {
            messages.push(Message::SetTheme(theme));
        }

        for msg in messages {
            self.controller.handle(msg);
        }

        if self.controller.model().last_command.is_some() {
            ctx.request_repaint();
        }
    }
}

fn keypad_button(ui: &mut egui::Ui, digit: u8, messages: &mut Vec<Message>) {
    if let Some(code) = CommandCode::memory(digit) {
        let text = RichText::new(digit.to_string()).color(Color32::WHITE).strong();
        let button = egui::Button::new(text).fill(KEYPAD_BLUE);
        if ui.add_sized(KEY_SIZE, button).clicked() {
            messages.push(Message::Send(code));
        }
    }
}
