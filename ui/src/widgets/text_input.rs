//! Controlled single-line text field.
//!
//! The caller owns the text: [`TextInput`] shows the value it is given and
//! reports the full new string on every edit, never keeping a copy of its own.

use egui::{
    Align2, Id, Layout, Margin, Rect, Response, RichText, Stroke, StrokeKind, TextEdit, TextStyle,
    Ui, pos2,
};

use crate::utils::colors::COLOR_RED;

/// Padding reserved on a side that carries a section.
pub const SECTION_WIDTH: i8 = 36;

const SECTION_OPACITY: f32 = 0.7;

type Attrs<'a> = Box<dyn FnOnce(TextEdit<'_>) -> TextEdit<'_> + 'a>;

/// What a [`TextInput`] reported this frame.
#[derive(Debug)]
pub struct TextInputResponse {
    pub response: Response,
    /// The full new value, on frames with an edit.
    pub changed: Option<String>,
}

pub struct TextInput<'a> {
    value: &'a str,
    id_salt: Id,
    label: Option<&'a str>,
    description: Option<&'a str>,
    error: Option<&'a str>,
    required: bool,
    left_section: Option<&'a str>,
    right_section: Option<&'a str>,
    placeholder: Option<&'a str>,
    attrs: Option<Attrs<'a>>,
}

impl<'a> TextInput<'a> {
    pub fn new(id_salt: impl std::hash::Hash, value: &'a str) -> Self {
        Self {
            value,
            id_salt: Id::new(id_salt),
            label: None,
            description: None,
            error: None,
            required: false,
            left_section: None,
            right_section: None,
            placeholder: None,
            attrs: None,
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    /// Outlines the field in red and shows `error` below it.
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn left_section(mut self, section: &'a str) -> Self {
        self.left_section = Some(section);
        self
    }

    pub fn right_section(mut self, section: &'a str) -> Self {
        self.right_section = Some(section);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Adjusts the underlying [`TextEdit`] (char limit, password mode, width...).
    pub fn attrs(mut self, attrs: impl FnOnce(TextEdit<'_>) -> TextEdit<'_> + 'a) -> Self {
        self.attrs = Some(Box::new(attrs));
        self
    }

    pub fn show(self, ui: &mut Ui) -> TextInputResponse {
        let Self {
            value,
            id_salt,
            label,
            description,
            error,
            required,
            left_section,
            right_section,
            placeholder,
            attrs,
        } = self;

        let mut text = value.to_owned();
        let default_margin = ui.spacing().button_padding.x as i8;
        let margin = Margin {
            left: if left_section.is_some() { SECTION_WIDTH } else { default_margin },
            right: if right_section.is_some() { SECTION_WIDTH } else { default_margin },
            top: 2,
            bottom: 2,
        };

        // Stack vertically but keep the parent's horizontal alignment.
        let layout = Layout::top_down(ui.layout().horizontal_align());
        let response = ui
            .with_layout(layout, |ui| {
                let label_id = label.map(|label| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 2.0;
                        let id = ui.label(label).id;
                        if required {
                            ui.colored_label(COLOR_RED, "*");
                        }
                        id
                    })
                    .inner
                });

                let mut edit = TextEdit::singleline(&mut text)
                    .id_salt(id_salt)
                    .margin(margin);
                if let Some(placeholder) = placeholder {
                    edit = edit.hint_text(placeholder);
                }
                if let Some(attrs) = attrs {
                    edit = attrs(edit);
                }

                let mut response = ui.add(edit);
                if let Some(label_id) = label_id {
                    response = response.labelled_by(label_id);
                }

                if let Some(section) = left_section {
                    let slot = Rect::from_min_max(
                        response.rect.min,
                        pos2(response.rect.left() + f32::from(SECTION_WIDTH), response.rect.bottom()),
                    );
                    paint_section(ui, slot, section);
                }
                if let Some(section) = right_section {
                    let slot = Rect::from_min_max(
                        pos2(response.rect.right() - f32::from(SECTION_WIDTH), response.rect.top()),
                        response.rect.max,
                    );
                    paint_section(ui, slot, section);
                }

                if error.is_some() {
                    ui.painter().rect_stroke(
                        response.rect,
                        ui.visuals().widgets.inactive.corner_radius,
                        Stroke::new(1.0, COLOR_RED),
                        StrokeKind::Inside,
                    );
                }
                if let Some(description) = description {
                    ui.label(RichText::new(description).small().weak());
                }
                if let Some(error) = error {
                    ui.label(RichText::new(error).small().color(COLOR_RED));
                }

                response
            })
            .inner;

        let changed = response.changed().then_some(text);
        TextInputResponse { response, changed }
    }
}

fn paint_section(ui: &Ui, slot: Rect, section: &str) {
    let color = ui.visuals().text_color().gamma_multiply(SECTION_OPACITY);
    ui.painter().text(
        slot.center(),
        Align2::CENTER_CENTER,
        section,
        TextStyle::Body.resolve(ui.style()),
        color,
    );
}
