//! Chart generation for the dashboard.
//!
//! This module creates ECharts configurations for the two overview charts:
//! - **Expense Distribution**: doughnut chart of expenses by category
//! - **Monthly Overview**: income and expenses for each calendar month
//!
//! The charts are returned as JSON option objects; drawing them is left to
//! the client.

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisPointer, AxisPointerType, AxisType, Color, ItemStyle, Tooltip, Trigger},
    series::{Pie, bar},
};
use serde::Serialize;

use crate::{
    Error,
    category::Category,
    dashboard::aggregation::{MONTH_LABELS, MonthlyTotals},
};

const CATEGORY_COLORS: [&str; 8] = [
    "#f72585", "#7209b7", "#4361ee", "#4cc9f0", "#ff9e00", "#06d6a0", "#118ab2", "#6c757d",
];
const INCOME_COLOR: &str = "#4cc9f0";
const EXPENSE_COLOR: &str = "#f72585";

/// The ECharts options for both dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    /// Options for the expense distribution chart.
    pub expense_chart: serde_json::Value,
    /// Options for the monthly overview chart.
    pub monthly_chart: serde_json::Value,
}

impl ChartOptions {
    /// Build both charts and convert them to JSON.
    ///
    /// # Errors
    /// Returns an [Error::JSONSerializationError] if a chart cannot be
    /// represented as JSON.
    pub fn new(
        expenses_by_category: &BTreeMap<Category, f64>,
        monthly: &MonthlyTotals,
    ) -> Result<Self, Error> {
        Ok(Self {
            expense_chart: chart_to_json(&expense_chart(expenses_by_category))?,
            monthly_chart: chart_to_json(&monthly_chart(monthly))?,
        })
    }
}

pub(super) fn expense_chart(expenses_by_category: &BTreeMap<Category, f64>) -> Chart {
    let labels: Vec<String> = expenses_by_category
        .keys()
        .map(|category| category.label())
        .collect();
    let data: Vec<(f64, &str)> = expenses_by_category
        .values()
        .zip(labels.iter())
        .map(|(total, label)| (*total, label.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Expense Distribution"))
        .color(CATEGORY_COLORS.iter().map(|&color| Color::from(color)).collect())
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left("center").top("bottom"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

pub(super) fn monthly_chart(monthly: &MonthlyTotals) -> Chart {
    let income: Vec<f64> = monthly.iter().map(|month| month.income).collect();
    let expenses: Vec<f64> = monthly.iter().map(|month| month.expense).collect();

    Chart::new()
        .title(Title::new().text("Monthly Overview"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().left("center").top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(MONTH_LABELS.to_vec()),
        )
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(
            bar::Bar::new()
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .data(income),
        )
        .series(
            bar::Bar::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .data(expenses),
        )
}

fn chart_to_json(chart: &Chart) -> Result<serde_json::Value, Error> {
    serde_json::from_str(&chart.to_string()).map_err(|error| {
        tracing::error!("could not convert chart to JSON: {error}");
        Error::JSONSerializationError(error.to_string())
    })
}
