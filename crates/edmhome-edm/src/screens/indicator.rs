// ── Stand indicator and stand button ──

use edmhome_core::{Device, Group};

use super::IndicatorStyle;
use crate::error::EdmError;
use crate::layout::Layout;
use crate::style::{Alignment, Color, Font};
use crate::widget::{Visibility, Widget};

/// Size of the stand label block.
const STAND_SIZE: (i32, i32) = (50, 20);
const STAND_FRAME_WIDTH: i32 = 2;

/// Motor status lights for a stand.
///
/// One alarm-colored light per motor, packed into columns, with a motion
/// frame per motor that shows while that motor moves. The whole indicator
/// opens a menu on the group's selector.
pub fn stand_indicator(group: &Group, style: &IndicatorStyle) -> Result<Layout, EdmError> {
    let selector = group.selector()?;
    let motors: Vec<&Device> = group
        .devices()
        .into_iter()
        .map(|d| &**d)
        .filter(|d| d.is_motor())
        .collect();

    let mut lights = Layout::horizontal().with_spacing(style.spacing);
    for column in motors.chunks(style.max_col_height.max(1)) {
        let mut col = Layout::vertical().with_spacing(style.spacing);
        for motor in column {
            col.push(light(motor, style));
        }
        lights.push(col);
    }

    let frame_w = lights.width() + style.frame_margin;
    let frame_h = lights.height() + style.frame_margin;

    let mut indicator = Layout::stacked().with_alignment(Alignment::Center);
    for motor in &motors {
        indicator.push(motion_frame(motor, frame_w, frame_h, style));
    }
    indicator.push(lights);

    Ok(indicator.buttonize_menu(selector.to_string(), Color::Grey))
}

fn light(motor: &Device, style: &IndicatorStyle) -> Widget {
    let mut w = Widget::circle(style.size, Color::Green);
    if let Some(circle) = w.as_circle_mut() {
        circle.alarm_pv = Some(format!("{}{}", motor.prefix, style.alarm_suffix));
    }
    w
}

fn motion_frame(motor: &Device, w: i32, h: i32, style: &IndicatorStyle) -> Widget {
    let pv = format!("{}{}", motor.prefix, style.motion_suffix);
    Widget::rectangle(w, h, Color::Yellow).with_visibility(Visibility::new(pv, 0.0, 1.0))
}

/// Labeled block standing in for the stand itself.
pub fn stand_button(group: &Group) -> Layout {
    let mut symbol = Widget::text(group.name(), STAND_SIZE.0, STAND_SIZE.1);
    if let Some(text) = symbol.as_text_mut() {
        text.fill = Some(Color::Grey);
        text.font = Font::bold();
        text.line_width = STAND_FRAME_WIDTH;
    }
    Layout::stacked().with(symbol)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use edmhome_core::{Child, CoreError};
    use pretty_assertions::assert_eq;

    fn motor_groups() -> Group {
        let dev = |prefix: &str| Child::from(Device::new(prefix).with_prefix(prefix));
        let sub = Group::new(
            "sub",
            [dev("MMS:tst1"), dev("MMS:tst2"), dev("MMS:tst3"), dev("CAM:tst6")],
        )
        .unwrap();
        Group::new(
            "main",
            [dev("MMS:tst4"), dev("MMS:tst5"), dev("MMS:tst6"), sub.into()],
        )
        .unwrap()
    }

    #[test]
    fn indicator_has_menu_frames_and_lights() {
        let main = motor_groups();
        let indicator = stand_indicator(&main, &IndicatorStyle::default()).unwrap();

        let items = indicator.items();
        // menu + six frames + lights
        assert_eq!(items.len(), 8);
        assert!(items[0].as_widget().unwrap().is_menu_button());

        let lights = items.last().and_then(|i| i.as_layout()).unwrap();
        assert_eq!(lights.len(), 1);
        assert_eq!(lights.items()[0].as_layout().unwrap().len(), 6);
    }

    #[test]
    fn menu_controls_the_group_selector() {
        let main = motor_groups();
        let indicator = stand_indicator(&main, &IndicatorStyle::default()).unwrap();
        let placed = indicator.place(0, 0);
        let text = crate::writer::Screen {
            w: 100,
            h: 100,
            widgets: placed,
        }
        .to_string();
        assert!(text.contains(&format!("controlPv \"{}\"", main.selector().unwrap())));
        assert!(text.contains("alarmPv \"MMS:tst1.MSTA\""));
        assert!(text.contains("visPv \"MMS:tst6.DMOV\""));
        assert!(!text.contains("CAM:tst6"));
    }

    #[test]
    fn columns_follow_max_height() {
        let style = IndicatorStyle {
            max_col_height: 3,
            ..IndicatorStyle::default()
        };
        let indicator = stand_indicator(&motor_groups(), &style).unwrap();
        assert_eq!(indicator.len(), 8);
        let lights = indicator.items().last().and_then(|i| i.as_layout()).unwrap();
        assert_eq!(lights.len(), 2);
    }

    #[test]
    fn frame_wraps_lights_with_margin() {
        let indicator = stand_indicator(&motor_groups(), &IndicatorStyle::default()).unwrap();
        let frame = indicator.items()[1].as_widget().unwrap();
        // one column of six 5px lights, 2px apart
        assert_eq!((frame.width(), frame.height()), (5 + 4, 6 * 5 + 5 * 2 + 4));
        assert_eq!((indicator.width(), indicator.height()), (9, 44));
    }

    #[test]
    fn indicator_needs_subgroups() {
        let leaf = Group::new("leaf", [Child::from(Device::new("m").with_prefix("MMS:1"))]).unwrap();
        assert!(matches!(
            stand_indicator(&leaf, &IndicatorStyle::default()),
            Err(EdmError::Core(CoreError::NoSubgroups { .. }))
        ));
    }

    #[test]
    fn stand_button_is_one_label() {
        let group = Group::new("DG2", []).unwrap();
        let button = stand_button(&group);
        assert_eq!(button.len(), 1);
        let text = button.items()[0].as_widget().and_then(Widget::as_text).unwrap();
        assert_eq!(text.text, "DG2");
        assert!(text.font.bold);
        assert_eq!((button.width(), button.height()), STAND_SIZE);
    }
}
