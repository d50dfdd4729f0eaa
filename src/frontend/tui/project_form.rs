//! Popup for creating and editing gallery projects.
//!
//! Images are entered one per line: `http(s)://` lines keep an already
//! hosted image, anything else is a local file to upload.

use super::form_frame;
use super::widget_traits::{Cyclable, FieldNavigable, Saveable, TextEditable};
use crate::data::{Category, ImageSource, ProjectDraft};
use crate::theme::AppTheme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use tui_textarea::TextArea;

const FIELD_COUNT: usize = 4;
const TITLE_FIELD: usize = 0;
const DESCRIPTION_FIELD: usize = 1;
const CATEGORY_FIELD: usize = 2;
const IMAGES_FIELD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectFormResult {
    Save(ProjectDraft),
    Cancel,
}

pub struct ProjectFormWidget {
    mode: FormMode,
    focused_field: usize,
    title: TextArea<'static>,
    description: TextArea<'static>,
    category: Option<Category>,
    images: TextArea<'static>,
    error: Option<String>,
}

impl ProjectFormWidget {
    pub fn new() -> Self {
        let mut title = TextArea::default();
        title.set_placeholder_text("Project title");
        let mut description = TextArea::default();
        description.set_placeholder_text("What was built");
        let mut images = TextArea::default();
        images.set_placeholder_text("One image URL or file path per line");

        Self {
            mode: FormMode::Create,
            focused_field: TITLE_FIELD,
            title,
            description,
            category: None,
            images,
            error: None,
        }
    }

    pub fn new_edit(draft: &ProjectDraft) -> Self {
        let mut form = Self::new();
        form.mode = FormMode::Edit;
        form.title.insert_str(&draft.title);
        form.description.insert_str(&draft.description);
        form.category = draft.category.clone();
        let images = draft
            .images
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        form.images.insert_str(&images);
        form
    }

    /// Build from an optional seed: `None` creates a new project
    pub fn from_seed(draft: Option<&ProjectDraft>) -> Self {
        match draft {
            Some(draft) => Self::new_edit(draft),
            None => Self::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn input(&mut self, key: KeyEvent) -> Option<ProjectFormResult> {
        match key.code {
            KeyCode::Esc => return Some(ProjectFormResult::Cancel),
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.select_all();
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.try_save();
            }
            KeyCode::Tab => FieldNavigable::next_field(self),
            KeyCode::BackTab => FieldNavigable::previous_field(self),
            _ if self.focused_field == CATEGORY_FIELD => match key.code {
                KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => self.cycle_forward(),
                KeyCode::Left | KeyCode::Up => self.cycle_backward(),
                KeyCode::Enter => FieldNavigable::next_field(self),
                _ => {}
            },
            KeyCode::Enter if self.focused_field == TITLE_FIELD => {
                FieldNavigable::next_field(self);
            }
            _ => {
                if let Some(field) = self.get_focused_field_mut() {
                    field.input(key);
                }
            }
        }
        None
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &AppTheme) {
        let popup = form_frame::centered_popup(area, 72, 18);
        let title = match self.mode {
            FormMode::Create => " Add New Project ",
            FormMode::Edit => " Edit Project ",
        };
        form_frame::draw_frame(popup, buf, title, theme);

        let x = popup.x + 2;
        let width = popup.width.saturating_sub(4);
        let focused = self.focused_field;
        let mut y = popup.y + 2;

        form_frame::render_text_field(
            focused == TITLE_FIELD,
            "Title *",
            &mut self.title,
            x,
            y,
            width,
            1,
            buf,
            theme,
        );
        y += 2;

        form_frame::render_text_field(
            focused == DESCRIPTION_FIELD,
            "Description *",
            &mut self.description,
            x,
            y,
            width,
            3,
            buf,
            theme,
        );
        y += 4;

        form_frame::render_label(focused == CATEGORY_FIELD, "Category *", x, y, buf, theme);
        let (text, style) = match &self.category {
            Some(category) => (
                format!("◀ {} ▶", category),
                Style::default().fg(theme.form_field_text),
            ),
            None => (
                "◀ Select category ▶".to_string(),
                Style::default().fg(theme.text_disabled),
            ),
        };
        let style = if focused == CATEGORY_FIELD {
            style.bg(theme.background_selected)
        } else {
            style
        };
        buf.set_string(x + form_frame::LABEL_WIDTH, y, text, style);
        y += 2;

        form_frame::render_text_field(
            focused == IMAGES_FIELD,
            "Images *",
            &mut self.images,
            x,
            y,
            width,
            4,
            buf,
            theme,
        );
        y += 5;

        form_frame::render_error(self.error.as_deref(), x, y, width, buf, theme);
        let hints = "Ctrl+S:Save  Tab:Next  ←/→:Category  Esc:Cancel";
        form_frame::render_hints(hints, x, popup.y + popup.height - 2, width, buf, theme);
    }
}

impl Default for ProjectFormWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEditable for ProjectFormWidget {
    fn get_focused_field(&self) -> Option<&TextArea<'static>> {
        match self.focused_field {
            TITLE_FIELD => Some(&self.title),
            DESCRIPTION_FIELD => Some(&self.description),
            IMAGES_FIELD => Some(&self.images),
            _ => None,
        }
    }

    fn get_focused_field_mut(&mut self) -> Option<&mut TextArea<'static>> {
        match self.focused_field {
            TITLE_FIELD => Some(&mut self.title),
            DESCRIPTION_FIELD => Some(&mut self.description),
            IMAGES_FIELD => Some(&mut self.images),
            _ => None,
        }
    }
}

impl FieldNavigable for ProjectFormWidget {
    fn next_field(&mut self) {
        self.focused_field = (self.focused_field + 1) % FIELD_COUNT;
    }

    fn previous_field(&mut self) {
        self.focused_field = (self.focused_field + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    fn field_count(&self) -> usize {
        FIELD_COUNT
    }

    fn current_field(&self) -> usize {
        self.focused_field
    }
}

impl Cyclable for ProjectFormWidget {
    fn cycle_forward(&mut self) {
        let choices = &Category::SELECTABLE;
        let next = match self
            .category
            .as_ref()
            .and_then(|current| choices.iter().position(|c| c == current))
        {
            Some(idx) => (idx + 1) % choices.len(),
            None => 0,
        };
        self.category = Some(choices[next].clone());
    }

    fn cycle_backward(&mut self) {
        let choices = &Category::SELECTABLE;
        let previous = match self
            .category
            .as_ref()
            .and_then(|current| choices.iter().position(|c| c == current))
        {
            Some(idx) => (idx + choices.len() - 1) % choices.len(),
            None => choices.len() - 1,
        };
        self.category = Some(choices[previous].clone());
    }
}

impl Saveable for ProjectFormWidget {
    type SaveResult = ProjectFormResult;

    fn try_save(&mut self) -> Option<Self::SaveResult> {
        self.error = None;
        Some(ProjectFormResult::Save(ProjectDraft {
            title: form_frame::field_text(&self.title).trim().to_string(),
            description: form_frame::field_text(&self.description).trim().to_string(),
            category: self.category.clone(),
            images: self.images.lines().iter().filter_map(|line| ImageSource::parse(line)).collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut ProjectFormWidget, text: &str) {
        for c in text.chars() {
            form.input(key(KeyCode::Char(c)));
        }
    }

    fn save(form: &mut ProjectFormWidget) -> ProjectDraft {
        match form.input(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)) {
            Some(ProjectFormResult::Save(draft)) => draft,
            other => panic!("expected save, got {:?}", other),
        }
    }

    #[test]
    fn test_create_collects_images_by_line() {
        let mut form = ProjectFormWidget::new();
        assert_eq!(form.mode(), FormMode::Create);
        type_text(&mut form, "MRI Suite");
        form.input(key(KeyCode::Enter));
        type_text(&mut form, "Shielded room");
        form.input(key(KeyCode::Tab));
        form.input(key(KeyCode::Right));
        form.input(key(KeyCode::Enter));
        type_text(&mut form, "https://cdn/a.jpg");
        form.input(key(KeyCode::Enter));
        form.input(key(KeyCode::Enter));
        type_text(&mut form, "photos/b.png");

        let draft = save(&mut form);
        assert_eq!(draft.title, "MRI Suite");
        assert_eq!(draft.category, Some(Category::Medical));
        assert_eq!(
            draft.images,
            vec![
                ImageSource::Existing("https://cdn/a.jpg".into()),
                ImageSource::Upload(PathBuf::from("photos/b.png")),
            ]
        );
    }

    #[test]
    fn test_category_cycles_both_ways() {
        let mut form = ProjectFormWidget::new();
        form.cycle_backward();
        assert_eq!(form.category(), Some(&Category::Commercial));
        form.cycle_forward();
        assert_eq!(form.category(), Some(&Category::Medical));

        form.category = Some(Category::Other("Retail".into()));
        form.cycle_forward();
        assert_eq!(form.category(), Some(&Category::Medical));
    }

    #[test]
    fn test_edit_prefills_draft() {
        let draft = ProjectDraft {
            title: "Villa".into(),
            description: "Living room".into(),
            category: Some(Category::Residential),
            images: vec![
                ImageSource::Existing("https://cdn/1.jpg".into()),
                ImageSource::Existing("https://cdn/2.jpg".into()),
            ],
        };
        let mut form = ProjectFormWidget::from_seed(Some(&draft));
        assert_eq!(form.mode(), FormMode::Edit);
        assert_eq!(save(&mut form), draft);
    }

    #[test]
    fn test_category_field_ignores_text() {
        let mut form = ProjectFormWidget::new();
        form.input(key(KeyCode::Tab));
        form.input(key(KeyCode::Tab));
        assert_eq!(form.current_field(), CATEGORY_FIELD);
        type_text(&mut form, "xyz");
        assert!(form.get_focused_field().is_none());
        assert_eq!(save(&mut form).title, "");
    }
}
