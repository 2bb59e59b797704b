use iocraft::prelude::*;

use crate::render::RenderedStatus;

// ---------------------------------------------------------------------------
// Loading indicator
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct LoadingIndicatorProps {
    pub status: Option<RenderedStatus>,
}

#[component]
pub fn LoadingIndicator(props: &mut LoadingIndicatorProps) -> impl Into<AnyElement<'static>> {
    let Some(s) = props.status.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(padding_left: 1, padding_right: 1) {
            Text(content: s.text, color: s.fg, weight: Weight::Bold, wrap: TextWrap::NoWrap)
        }
    }
    .into_any()
}

// ---------------------------------------------------------------------------
// Error banner
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct ErrorBannerProps {
    pub status: Option<RenderedStatus>,
}

#[component]
pub fn ErrorBanner(props: &mut ErrorBannerProps) -> impl Into<AnyElement<'static>> {
    let Some(s) = props.status.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Single,
            border_color: s.fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(content: "error", color: s.fg, weight: Weight::Bold, wrap: TextWrap::NoWrap)
            Text(content: s.text, color: s.fg)
        }
    }
    .into_any()
}
