//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations of the spending summaries:
//! - **Monthly Expenses Chart**: Bar chart of the total spent in each month
//! - **Category Chart**: Pie chart of the share of spending in each category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, JsFunction, Label, Tooltip,
        Trigger,
    },
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    aggregation::{CategorySummary, MonthlyTotal},
    html::HeadElement,
};

/// The colours used for the slices of the category chart.
const CATEGORY_COLORS: [&str; 5] = ["#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#FF6347"];

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn monthly_expenses_chart(monthly: &[MonthlyTotal]) -> Chart {
    let labels = monthly
        .iter()
        .map(|month| month.month.clone())
        .collect::<Vec<_>>();
    let values = monthly.iter().map(|month| month.total).collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("Monthly Expenses"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Total").data(values))
}

pub(super) fn category_chart(categories: &[CategorySummary]) -> Chart {
    let data = categories
        .iter()
        .map(|summary| (summary.total, summary.category.as_str()))
        .collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("Category Distribution"))
        .color(CATEGORY_COLORS.into_iter().map(Color::from).collect())
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Spending")
                .radius("60%")
                .label(Label::new().formatter("{b}: {d}%"))
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-IN', {
              style: 'currency',
              currency: 'INR'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

#[cfg(test)]
mod tests {
    use crate::{
        aggregation::{CategorySummary, MonthlyTotal},
        category::Category,
        dashboard::charts::{category_chart, monthly_expenses_chart},
    };

    #[test]
    fn monthly_chart_labels_months_in_order() {
        let monthly = vec![
            MonthlyTotal {
                month: "Mar 2024".to_owned(),
                total: 150.0,
            },
            MonthlyTotal {
                month: "Jan 2024".to_owned(),
                total: 50.0,
            },
        ];

        let options = monthly_expenses_chart(&monthly).to_string();

        let march = options.find("Mar 2024").expect("March label missing");
        let january = options.find("Jan 2024").expect("January label missing");
        assert!(march < january, "got options {options}");
    }

    #[test]
    fn category_chart_names_each_slice() {
        let categories = vec![CategorySummary {
            category: Category::Food,
            total: 5500.0,
            budget: 5000.0,
            remaining: -500.0,
        }];

        let options = category_chart(&categories).to_string();

        assert!(options.contains(r#""Food""#), "got options {options}");
        assert!(options.contains("5500"), "got options {options}");
    }
}
