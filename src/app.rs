use iced::widget::button as button_widget;
use iced::widget::container as container_widget;
use iced::widget::{button, checkbox, column, container, pick_list, row, scrollable, text, text_input, Column};
use iced::theme;
use iced::{Alignment, Background, Color, Command, Element, Length, Theme};

use sp3ctragen::presets::{find, load_presets, save_presets, upsert, Preset};
use sp3ctragen::{submit, Engine, SettingsForm, Submission};

const FIELD_WIDTH: f32 = 90.0;

#[derive(Debug, Clone)]
pub enum Message {
    FftSizeChanged(String),
    OverlapChanged(String),
    MinFreqChanged(String),
    MaxFreqChanged(String),
    DurationChanged(String),
    SampleRateChanged(String),
    DynamicRangeChanged(String),
    GammaChanged(String),
    DitheringChanged(bool),
    ContrastChanged(String),
    HighBoostChanged(bool),
    HighBoostAlphaChanged(String),
    InputChanged(String),
    OutputFolderChanged(String),
    BrowseInput,
    InputPicked(Option<String>),
    BrowseOutputFolder,
    OutputFolderPicked(Option<String>),
    PresetSelected(String),
    PresetNameChanged(String),
    SavePreset,
    LoadPreset,
    Generate,
    Generated(Submission),
}

pub struct App {
    form: SettingsForm,
    presets: Vec<Preset>,
    preset_selected: Option<String>,
    preset_name: String,
    status: String,
    generating: bool,
}

impl Default for App {
    fn default() -> Self {
        App {
            form: SettingsForm::default(),
            presets: Vec::new(),
            preset_selected: None,
            preset_name: "Default".to_string(),
            status: "Idle".to_string(),
            generating: false,
        }
    }
}

impl iced::Application for App {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Self::Message>) {
        let mut app = Self::default();
        match load_presets() {
            Ok(p) => app.presets = p,
            Err(e) => {
                log::warn!("presets not loaded: {:#}", e);
            }
        }
        (app, Command::none())
    }

    fn title(&self) -> String {
        "Sp3ctraGen".to_string()
    }

    fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
        match message {
            Message::FftSizeChanged(v) => self.form.fft_size = v,
            Message::OverlapChanged(v) => self.form.overlap = v,
            Message::MinFreqChanged(v) => self.form.min_freq = v,
            Message::MaxFreqChanged(v) => self.form.max_freq = v,
            Message::DurationChanged(v) => self.form.duration = v,
            Message::SampleRateChanged(v) => self.form.sample_rate = v,
            Message::DynamicRangeChanged(v) => self.form.dynamic_range_db = v,
            Message::GammaChanged(v) => self.form.gamma_correction = v,
            Message::DitheringChanged(v) => self.form.enable_dithering = v,
            Message::ContrastChanged(v) => self.form.contrast_factor = v,
            Message::HighBoostChanged(v) => self.form.enable_high_boost = v,
            Message::HighBoostAlphaChanged(v) => self.form.high_boost_alpha = v,
            Message::InputChanged(v) => self.form.input_file = v,
            Message::OutputFolderChanged(v) => self.form.output_folder = v,
            Message::BrowseInput => {
                return Command::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select WAV file")
                            .add_filter("WAV audio", &["wav", "wave"])
                            .pick_file()
                            .await
                            .map(|f| f.path().display().to_string())
                    },
                    Message::InputPicked,
                );
            }
            Message::InputPicked(path) => {
                if let Some(path) = path {
                    self.form.input_file = path;
                }
            }
            Message::BrowseOutputFolder => {
                return Command::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select Output Folder")
                            .pick_folder()
                            .await
                            .map(|f| f.path().display().to_string())
                    },
                    Message::OutputFolderPicked,
                );
            }
            Message::OutputFolderPicked(path) => {
                if let Some(path) = path {
                    self.form.output_folder = path;
                }
            }
            Message::PresetSelected(v) => self.preset_selected = Some(v),
            Message::PresetNameChanged(v) => self.preset_name = v,
            Message::SavePreset => {
                let name = self.preset_name.trim().to_string();
                if name.is_empty() {
                    self.status = "Preset name is required".to_string();
                    return Command::none();
                }
                let mut presets = self.presets.clone();
                upsert(&mut presets, Preset { name, form: self.form.clone() });
                match save_presets(&presets) {
                    Ok(()) => self.presets = presets,
                    Err(e) => self.status = format!("Preset save error: {}", e),
                }
            }
            Message::LoadPreset => {
                if let Some(name) = &self.preset_selected {
                    if let Some(p) = find(&self.presets, name).cloned() {
                        self.preset_name = p.name;
                        self.form = p.form;
                    }
                }
            }
            Message::Generate => {
                if self.generating {
                    return Command::none();
                }
                if self.form.input_file.is_empty() || self.form.output_folder.is_empty() {
                    return Command::none();
                }

                self.status = "Generating...".to_string();
                self.generating = true;

                let form = self.form.clone();
                return Command::perform(
                    async move { submit(&Engine::default(), &form) },
                    Message::Generated,
                );
            }
            Message::Generated(result) => {
                self.generating = false;
                self.status = match result {
                    Submission::Skipped => "Idle".to_string(),
                    Submission::Completed(path) => format!("Done: {}", path.display()),
                    Submission::Failed(e) => format!("Error generating spectrogram. Return code: {}", e.code()),
                };
            }
        }
        Command::none()
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let field = |label: &str, placeholder: &str, value: &str, on_input: fn(String) -> Message| {
            row![
                text(label).width(Length::Fixed(180.0)),
                text_input(placeholder, value)
                    .on_input(on_input)
                    .width(Length::Fixed(FIELD_WIDTH)),
            ]
            .spacing(10)
            .align_items(Alignment::Center)
        };

        let f = &self.form;
        let settings_card = card(
            "Spectrogram Settings",
            column![
                field("FFT Size:", "8192", &f.fft_size, Message::FftSizeChanged),
                field("Overlap (0..1):", "0.85", &f.overlap, Message::OverlapChanged),
                field("Min Frequency (Hz):", "65", &f.min_freq, Message::MinFreqChanged),
                field("Max Frequency (Hz):", "16640", &f.max_freq, Message::MaxFreqChanged),
                field("Duration (s):", "4.0", &f.duration, Message::DurationChanged),
                field("Sample Rate:", "192000", &f.sample_rate, Message::SampleRateChanged),
                field("Dynamic Range (dB):", "60.0", &f.dynamic_range_db, Message::DynamicRangeChanged),
                field("Gamma Correction:", "0.8", &f.gamma_correction, Message::GammaChanged),
                checkbox("Enable Dithering", f.enable_dithering, Message::DitheringChanged),
                field("Contrast Factor:", "1.9", &f.contrast_factor, Message::ContrastChanged),
                checkbox("High Boost Filter", f.enable_high_boost, Message::HighBoostChanged),
                field("High Boost Alpha:", "0.99", &f.high_boost_alpha, Message::HighBoostAlphaChanged),
            ],
        );

        let files_card = card(
            "Files",
            column![
                text("Input File:"),
                row![
                    text_input("Choose WAV file...", &f.input_file)
                        .on_input(Message::InputChanged)
                        .width(Length::Fill),
                    button("Browse...")
                        .style(theme::Button::Custom(Box::new(InkButton { filled: false })))
                        .on_press(Message::BrowseInput),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                text("Output Folder:"),
                row![
                    text_input("Choose folder...", &f.output_folder)
                        .on_input(Message::OutputFolderChanged)
                        .width(Length::Fill),
                    button("Browse...")
                        .style(theme::Button::Custom(Box::new(InkButton { filled: false })))
                        .on_press(Message::BrowseOutputFolder),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            ],
        );

        let preset_names = self.presets.iter().map(|p| p.name.clone()).collect::<Vec<_>>();
        let presets_card = card(
            "Presets",
            column![
                row![
                    text("Preset:"),
                    pick_list(preset_names, self.preset_selected.clone(), Message::PresetSelected),
                    button("Load")
                        .style(theme::Button::Custom(Box::new(InkButton { filled: false })))
                        .on_press(Message::LoadPreset),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
                row![
                    text("Name:"),
                    text_input("Preset name", &self.preset_name).on_input(Message::PresetNameChanged),
                    button("Save")
                        .style(theme::Button::Custom(Box::new(InkButton { filled: true })))
                        .on_press(Message::SavePreset),
                ]
                .spacing(10)
                .align_items(Alignment::Center),
            ],
        );

        let generate = if self.generating {
            button("Generating...")
                .padding(10)
                .style(theme::Button::Custom(Box::new(InkButton { filled: false })))
        } else {
            button("Generate Spectrogram")
                .on_press(Message::Generate)
                .padding(10)
                .style(theme::Button::Custom(Box::new(InkButton { filled: true })))
        };

        let content = column![
            settings_card,
            files_card,
            presets_card,
            row![generate, text(&self.status).style(GRAPHITE)]
                .spacing(12)
                .align_items(Alignment::Center),
        ]
        .spacing(16)
        .padding(20)
        .width(Length::Fill);

        container(scrollable(content).width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::Container::from(body_style))
            .into()
    }
}

// Paper tones.
const INK: Color = Color::from_rgb(0.12, 0.12, 0.13);
const GRAPHITE: Color = Color::from_rgb(0.45, 0.45, 0.47);
const RULE: Color = Color::from_rgb(0.80, 0.80, 0.78);
const PAPER: Color = Color::from_rgb(0.96, 0.95, 0.93);
const SHEET: Color = Color::from_rgb(1.0, 1.0, 1.0);

fn card<'a>(title: &str, content: Column<'a, Message>) -> Element<'a, Message> {
    container(
        column![
            text(title).size(13).style(GRAPHITE),
            content.spacing(8),
        ]
        .spacing(10),
    )
    .padding(12)
    .width(Length::Fill)
    .style(theme::Container::from(sheet_style))
    .into()
}

fn sheet_style(_theme: &Theme) -> container_widget::Appearance {
    container_widget::Appearance {
        background: Some(Background::Color(SHEET)),
        text_color: Some(INK),
        border_radius: 4.0.into(),
        border_width: 1.0,
        border_color: RULE,
    }
}

fn body_style(_theme: &Theme) -> container_widget::Appearance {
    container_widget::Appearance {
        background: Some(Background::Color(PAPER)),
        text_color: Some(INK),
        ..Default::default()
    }
}

/// Filled ink button for the main action, outlined for the rest.
struct InkButton {
    filled: bool,
}

impl button_widget::StyleSheet for InkButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button_widget::Appearance {
        let (background, text_color) = if self.filled { (INK, SHEET) } else { (SHEET, INK) };
        button_widget::Appearance {
            background: Some(Background::Color(background)),
            text_color,
            border_radius: 4.0.into(),
            border_width: 1.0,
            border_color: INK,
            ..Default::default()
        }
    }
}
