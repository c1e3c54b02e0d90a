use crate::tokens::*;
use shared::CheckboxState;
use zoon::*;

const CHECKBOX_SIZE: u32 = 16;

/// Glyph drawn inside the box, none when unchecked
pub fn checkbox_glyph(state: CheckboxState) -> Option<&'static str> {
    match state {
        CheckboxState::Unchecked => None,
        CheckboxState::Checked => Some("✓"),
        CheckboxState::Indeterminate => Some("–"),
    }
}

pub struct CheckboxBuilder {
    label: Option<String>,
}

impl CheckboxBuilder {
    pub fn new() -> Self {
        Self { label: None }
    }

    /// Accessible name, rendered as `aria-label`
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn state_signal<S>(self, state_signal: S) -> CheckboxBuilderWithSignal<S>
    where
        S: Signal<Item = CheckboxState> + Unpin + 'static,
    {
        CheckboxBuilderWithSignal {
            builder: self,
            state_signal,
            on_click: None,
        }
    }
}

impl Default for CheckboxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Tri-state checkbox driven by an external state signal.
///
/// A click resolves through [`CheckboxState::click`]; the box shows the
/// select-all result right away and follows the signal again on its next
/// emission.
pub struct CheckboxBuilderWithSignal<S>
where
    S: Signal<Item = CheckboxState> + Unpin + 'static,
{
    builder: CheckboxBuilder,
    state_signal: S,
    on_click: Option<Box<dyn Fn()>>,
}

impl<S> CheckboxBuilderWithSignal<S>
where
    S: Signal<Item = CheckboxState> + Unpin + 'static,
{
    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> impl Element {
        let CheckboxBuilder { label } = self.builder;
        let on_click = self.on_click;

        let displayed = Mutable::new(CheckboxState::Unchecked);
        let sync_task = Task::start_droppable(self.state_signal.for_each_sync({
            let displayed = displayed.clone();
            move |state| displayed.set_neq(state)
        }));

        Button::new()
            .s(Width::exact(CHECKBOX_SIZE))
            .s(Height::exact(CHECKBOX_SIZE))
            .s(Padding::all(0))
            .s(RoundedCorners::all(4))
            .s(Cursor::new(CursorIcon::Pointer))
            .s(Borders::all_signal(map_ref! {
                let theme = theme(),
                let state = displayed.signal() =>
                match state {
                    CheckboxState::Unchecked => Border::new().width(1).color(NEUTRAL_5.resolve(*theme)),
                    _ => Border::new().width(1).color(PRIMARY_7.resolve(*theme)),
                }
            }))
            .s(Background::new().color_signal(map_ref! {
                let theme = theme(),
                let state = displayed.signal() =>
                match state {
                    CheckboxState::Checked => PRIMARY_7.resolve(*theme),
                    CheckboxState::Indeterminate => PRIMARY_3.resolve(*theme),
                    CheckboxState::Unchecked => NEUTRAL_1.resolve(*theme),
                }
            }))
            .s(Font::new()
                .size(FONT_SIZE_12)
                .weight(FontWeight::SemiBold)
                .line_height(CHECKBOX_SIZE)
                .center()
                .color_signal(map_ref! {
                    let theme = theme(),
                    let state = displayed.signal() =>
                    match state {
                        CheckboxState::Checked => NEUTRAL_1.resolve(*theme),
                        _ => PRIMARY_7.resolve(*theme),
                    }
                }))
            .label_signal(displayed.signal().map(|state| checkbox_glyph(state).unwrap_or_default()))
            .update_raw_el({
                let displayed = displayed.clone();
                move |raw_el| {
                    let raw_el = raw_el
                        .attr("role", "checkbox")
                        .attr("tabindex", "0")
                        .attr_signal("aria-checked", displayed.signal().map(CheckboxState::aria_checked));
                    match label {
                        Some(label) => raw_el.attr("aria-label", &label),
                        None => raw_el,
                    }
                }
            })
            .on_press_event(move |event| {
                // keep the click away from the row's toggle handler
                event.pass_to_parent(false);
                let outcome = displayed.get().click();
                displayed.set(CheckboxState::after_select_all(outcome.select_all));
                if let Some(handler) = on_click.as_ref() {
                    handler();
                }
            })
            .after_remove(move |_| drop(sync_task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_follow_state() {
        assert_eq!(checkbox_glyph(CheckboxState::Unchecked), None);
        assert_eq!(checkbox_glyph(CheckboxState::Checked), Some("✓"));
        assert_eq!(checkbox_glyph(CheckboxState::Indeterminate), Some("–"));
    }
}
