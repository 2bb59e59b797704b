use iocraft::prelude::*;

use crate::render::RenderedIssue;

#[derive(Default, Props)]
pub struct IssueCardProps {
    pub card: Option<RenderedIssue>,
}

/// Id tag, title, link and a row of colored label chips.
#[component]
pub fn IssueCard(props: &mut IssueCardProps) -> impl Into<AnyElement<'static>> {
    let Some(card) = props.card.take() else {
        return element! { View }.into_any();
    };

    let has_labels = !card.labels.is_empty();

    element! {
        View(
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: card.border_fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            View(flex_direction: FlexDirection::Row) {
                Text(content: card.id, color: card.id_fg, wrap: TextWrap::NoWrap)
                Text(content: " ", color: card.id_fg)
                Text(
                    content: card.title,
                    color: card.title_fg,
                    weight: Weight::Bold,
                    decoration: TextDecoration::Underline,
                )
            }
            Text(content: card.url, color: card.url_fg, wrap: TextWrap::NoWrap)
            #(if has_labels {
                Some(element! {
                    View(flex_direction: FlexDirection::Row) {
                        #(card.labels.into_iter().enumerate().map(|(i, label)| {
                            element! {
                                View(key: i, padding_right: 1) {
                                    View(background_color: label.bg) {
                                        Text(content: format!(" {} ", label.name), color: label.fg, wrap: TextWrap::NoWrap)
                                    }
                                }
                            }.into_any()
                        }))
                    }
                })
            } else {
                None
            })
        }
    }
    .into_any()
}
