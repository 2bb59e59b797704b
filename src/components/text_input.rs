use iocraft::prelude::*;

use crate::theme::ResolvedTheme;

// ---------------------------------------------------------------------------
// Pre-rendered text input
// ---------------------------------------------------------------------------

pub struct RenderedTextInput {
    pub prompt: String,
    pub text: String,
    pub hint: String,
    pub text_fg: Color,
    pub prompt_fg: Color,
    pub hint_fg: Color,
    pub border_fg: Color,
}

impl RenderedTextInput {
    pub fn build(prompt: &str, text: &str, hint: &str, theme: &ResolvedTheme) -> Self {
        Self {
            prompt: prompt.to_owned(),
            text: format!("{text}\u{2588}"), // append full block cursor █
            hint: hint.to_owned(),
            text_fg: theme.paint(theme.text),
            prompt_fg: theme.paint(theme.link),
            hint_fg: theme.paint(theme.faint),
            border_fg: theme.paint(theme.border),
        }
    }
}

/// Apply one edit key to the input buffer. Returns `None` for keys that do
/// not edit text.
pub(crate) fn edit_buffer(buffer: &str, code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Backspace => {
            let mut next = buffer.to_owned();
            next.pop();
            Some(next)
        }
        KeyCode::Char('u') if ctrl => Some(String::new()),
        KeyCode::Char(ch) if !ctrl => Some(format!("{buffer}{ch}")),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// TextInput component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct TextInputProps {
    pub input: Option<RenderedTextInput>,
}

#[component]
pub fn TextInput(props: &mut TextInputProps) -> impl Into<AnyElement<'static>> {
    let Some(input) = props.input.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: input.border_fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            View(flex_direction: FlexDirection::Row) {
                Text(content: input.prompt, color: input.prompt_fg, weight: Weight::Bold, wrap: TextWrap::NoWrap)
                Text(content: " ", color: input.text_fg)
                Text(content: input.text, color: input.text_fg, wrap: TextWrap::NoWrap)
            }
            Text(content: input.hint, color: input.hint_fg, wrap: TextWrap::NoWrap)
        }
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_appends() {
        assert_eq!(
            edit_buffer("octo", KeyCode::Char('c'), KeyModifiers::NONE),
            Some("octoc".to_owned())
        );
        assert_eq!(
            edit_buffer("", KeyCode::Char('O'), KeyModifiers::SHIFT),
            Some("O".to_owned())
        );
    }

    #[test]
    fn backspace_removes_last_char() {
        assert_eq!(
            edit_buffer("ab", KeyCode::Backspace, KeyModifiers::NONE),
            Some("a".to_owned())
        );
        assert_eq!(
            edit_buffer("", KeyCode::Backspace, KeyModifiers::NONE),
            Some(String::new())
        );
    }

    #[test]
    fn ctrl_u_clears() {
        assert_eq!(
            edit_buffer("octocat/Hello-World", KeyCode::Char('u'), KeyModifiers::CONTROL),
            Some(String::new())
        );
    }

    #[test]
    fn other_keys_do_not_edit() {
        assert_eq!(edit_buffer("x", KeyCode::Enter, KeyModifiers::NONE), None);
        assert_eq!(
            edit_buffer("x", KeyCode::Char('a'), KeyModifiers::CONTROL),
            None
        );
    }

    #[test]
    fn cursor_is_appended() {
        let input = RenderedTextInput::build("repo:", "a/b", "", &ResolvedTheme::default());
        assert_eq!(input.text, "a/b\u{2588}");
    }
}
