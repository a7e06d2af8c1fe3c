use crate::{
    chart::errors::OverlayDrawError,
    indicators::{
        price_levels::{LevelLabel, PriceLevels},
        shape::{LineStyle, ShapeOptions, ShapePoint, VisibleRange},
    },
    models::{trade_direction::TradeDirection, traits::chart_library::ChartApi},
};
use tracing::{debug, error};

pub const LONG_ENTRY_COLOR: &str = "green";
pub const SHORT_ENTRY_COLOR: &str = "red";
pub const STOP_LOSS_COLOR: &str = "#FF4136";
pub const TAKE_PROFIT_COLOR: &str = "#2ECC40";
pub const EXIT_COLOR: &str = "#0074D9";

/// Draws labeled horizontal reference lines for a trade's price levels.
pub struct IndicatorOverlay;

impl IndicatorOverlay {
    /// Draws one line per set level across `range`. A line that fails is
    /// logged and skipped; returns the number of lines drawn.
    pub fn draw(
        chart: &mut dyn ChartApi,
        range: VisibleRange,
        levels: &PriceLevels,
        direction: TradeDirection,
    ) -> usize {
        let mut drawn = 0;

        for label in LevelLabel::DRAW_ORDER {
            let Some(price) = levels.get(label) else {
                continue;
            };

            match Self::draw_line(chart, range, label, price, direction) {
                Ok(()) => drawn += 1,
                Err(e) => error!(%label, price, error = %e, "Unable to draw indicator line"),
            }
        }

        debug!(drawn, "Indicator overlay drawn");
        drawn
    }

    fn draw_line(
        chart: &mut dyn ChartApi,
        range: VisibleRange,
        label: LevelLabel,
        price: f64,
        direction: TradeDirection,
    ) -> Result<(), OverlayDrawError> {
        let points = [
            ShapePoint {
                price,
                time: range.from,
            },
            ShapePoint {
                price,
                time: range.to,
            },
        ];

        chart
            .create_multipoint_shape(&points, &Self::line_options(label, price, direction))
            .map_err(|e| OverlayDrawError {
                label,
                reason: format!("{:#}", e),
            })
    }

    pub fn line_options(label: LevelLabel, price: f64, direction: TradeDirection) -> ShapeOptions {
        let (color, style) = match label {
            LevelLabel::Entry => match direction {
                TradeDirection::Long => (LONG_ENTRY_COLOR, LineStyle::Solid),
                TradeDirection::Short => (SHORT_ENTRY_COLOR, LineStyle::Solid),
            },
            LevelLabel::StopLoss => (STOP_LOSS_COLOR, LineStyle::Dashed),
            LevelLabel::TakeProfit => (TAKE_PROFIT_COLOR, LineStyle::Dashed),
            LevelLabel::Exit => (EXIT_COLOR, LineStyle::Solid),
        };

        ShapeOptions::horizontal_line(format!("{}: {}", label.caption(), price), color, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::test_support::RecordingChart;

    fn range() -> VisibleRange {
        VisibleRange { from: 100, to: 200 }
    }

    #[test]
    fn unset_levels_draw_nothing() {
        let mut chart = RecordingChart::default();
        let levels = PriceLevels {
            entry: Some(0.0),
            ..Default::default()
        };

        let drawn = IndicatorOverlay::draw(&mut chart, range(), &levels, TradeDirection::Long);

        assert_eq!(drawn, 0);
        assert!(chart.shapes().is_empty());
    }

    #[test]
    fn open_long_trade_draws_three_lines() {
        let mut chart = RecordingChart::default();
        let levels = PriceLevels {
            entry: Some(170.25),
            exit: None,
            stop_loss: Some(168.0),
            take_profit: Some(178.0),
        };

        let drawn = IndicatorOverlay::draw(&mut chart, range(), &levels, TradeDirection::Long);
        let shapes = chart.shapes();

        assert_eq!(drawn, 3);
        assert_eq!(shapes[0].1.text, "Entry: 170.25");
        assert_eq!(shapes[0].1.overrides.linecolor, "green");
        assert_eq!(shapes[0].1.overrides.linestyle, LineStyle::Solid);
        assert_eq!(shapes[1].1.text, "SL: 168");
        assert_eq!(shapes[1].1.overrides.linecolor, STOP_LOSS_COLOR);
        assert_eq!(shapes[1].1.overrides.linestyle, LineStyle::Dashed);
        assert_eq!(shapes[2].1.overrides.linecolor, TAKE_PROFIT_COLOR);
        assert_eq!(shapes[2].1.overrides.linestyle, LineStyle::Dashed);
    }

    #[test]
    fn lines_span_visible_range() {
        let mut chart = RecordingChart::default();
        let levels = PriceLevels {
            exit: Some(312.5),
            ..Default::default()
        };

        IndicatorOverlay::draw(&mut chart, range(), &levels, TradeDirection::Short);
        let (points, options) = &chart.shapes()[0];

        assert_eq!(points[0].time, 100);
        assert_eq!(points[1].time, 200);
        assert!(points.iter().all(|p| p.price == 312.5));
        assert_eq!(options.overrides.linecolor, EXIT_COLOR);
        assert_eq!(options.text, "Exit: 312.5");
    }

    #[test]
    fn short_entry_is_red() {
        let options = IndicatorOverlay::line_options(LevelLabel::Entry, 242.5, TradeDirection::Short);

        assert_eq!(options.overrides.linecolor, "red");
        assert_eq!(options.shape, "horizontal_line");
    }

    #[test]
    fn failed_line_does_not_stop_the_rest() {
        let mut chart = RecordingChart::failing_on("SL");
        let levels = PriceLevels {
            entry: Some(318.25),
            exit: Some(312.5),
            stop_loss: Some(322.0),
            take_profit: Some(310.0),
        };

        let drawn = IndicatorOverlay::draw(&mut chart, range(), &levels, TradeDirection::Short);
        let texts: Vec<String> = chart.shapes().into_iter().map(|(_, o)| o.text).collect();

        assert_eq!(drawn, 3);
        assert_eq!(texts, vec!["Entry: 318.25", "TP: 310", "Exit: 312.5"]);
    }

    #[test]
    fn serializes_like_the_library_expects() {
        let options = IndicatorOverlay::line_options(LevelLabel::StopLoss, 325.0, TradeDirection::Long);
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["overrides"]["linestyle"], 2);
        assert_eq!(json["overrides"]["showLabel"], true);
        assert_eq!(json["overrides"]["fontsize"], 12);
    }
}
