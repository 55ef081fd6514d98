use common::{headline::format_count, ChartSeries};
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

const LINE_COLOR: &str = "#2563eb";
const FILL_COLOR: &str = "rgba(37, 99, 235, 0.1)";
const PEAK_COLOR: &str = "#dc2626";
const POINT_RADIUS: u32 = 4;
const PEAK_RADIUS: u32 = 8;
const CHART_ID: &str = "trend-chart";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

/// Per-point marker colors and diameters; the peak is red and larger.
fn marker_style(chart: &ChartSeries) -> (Vec<&'static str>, Vec<u32>) {
    (0..chart.len())
        .map(|i| {
            if i == chart.peak_index {
                (PEAK_COLOR, PEAK_RADIUS * 2)
            } else {
                (LINE_COLOR, POINT_RADIUS * 2)
            }
        })
        .unzip()
}

/// Plotly trace list for the series
fn chart_traces(chart: &ChartSeries) -> Value {
    let (colors, sizes) = marker_style(chart);
    let hover: Vec<String> = chart
        .values
        .iter()
        .map(|v| format!("{} establishments", format_count(*v)))
        .collect();

    json!([{
        "x": chart.labels,
        "y": chart.values,
        "type": "scatter",
        "mode": "lines+markers",
        "name": "Establishments",
        "fill": "tozeroy",
        "fillcolor": FILL_COLOR,
        "line": {"color": LINE_COLOR, "width": 3, "shape": "spline", "smoothing": 0.6},
        "marker": {"color": colors, "size": sizes, "line": {"color": colors}},
        "text": hover,
        "hoverinfo": "x+text"
    }])
}

fn chart_layout() -> Value {
    json!({
        "margin": {"t": 10, "r": 10, "l": 60, "b": 30},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "showlegend": false,
        "hovermode": "x",
        "xaxis": {"showgrid": false, "type": "category"},
        "yaxis": {"showgrid": true, "gridcolor": "rgba(0, 0, 0, 0.05)", "tickformat": ",d", "rangemode": "normal"}
    })
}

fn to_js(value: &Value) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

#[derive(Properties, PartialEq)]
pub struct TrendChartProps {
    pub chart: ChartSeries,
}

#[function_component(TrendChart)]
pub fn trend_chart(props: &TrendChartProps) -> Html {
    let chart_ref = use_node_ref();

    use_effect_with((chart_ref.clone(), props.chart.clone()), move |(chart_ref, chart)| {
        if let Some(element) = chart_ref.cast::<Element>() {
            let config = json!({"responsive": true, "displayModeBar": false});
            match (to_js(&chart_traces(chart)), to_js(&chart_layout()), to_js(&config)) {
                (Ok(data), Ok(layout), Ok(config)) => {
                    log::debug!("Drawing chart with {} points, peak at {:?}", chart.len(), chart.peak_label());
                    newPlot(&element.id(), data, layout, config);
                }
                _ => log::error!("Failed to convert chart data for Plotly"),
            }
        }
        || ()
    });

    html! {
        <div ref={chart_ref} id={CHART_ID} class="chart-container" style="height: 320px;"></div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> ChartSeries {
        ChartSeries {
            labels: vec!["2015".into(), "2016".into(), "2017".into()],
            values: vec![10, 1500, 1200],
            peak_index: 1,
        }
    }

    #[test]
    fn test_peak_marker_is_highlighted() {
        let (colors, sizes) = marker_style(&chart());
        assert_eq!(colors, vec![LINE_COLOR, PEAK_COLOR, LINE_COLOR]);
        assert_eq!(sizes, vec![8, 16, 8]);
    }

    #[test]
    fn test_traces_carry_series() {
        let traces = chart_traces(&chart());
        assert_eq!(traces[0]["x"], json!(["2015", "2016", "2017"]));
        assert_eq!(traces[0]["y"], json!([10, 1500, 1200]));
        assert_eq!(traces[0]["text"][1], "1,500 establishments");
    }
}
