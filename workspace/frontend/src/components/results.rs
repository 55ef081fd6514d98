use compute::Lookup;
use yew::prelude::*;

use super::chart::TrendChart;

#[derive(Properties, PartialEq)]
pub struct ResultsProps {
    pub lookup: Lookup,
}

#[function_component(Results)]
pub fn results(props: &ResultsProps) -> Html {
    let lookup = &props.lookup;
    let section_ref = use_node_ref();

    {
        let section_ref = section_ref.clone();
        use_effect_with(lookup.clone(), move |_| {
            if let Some(element) = section_ref.cast::<web_sys::Element>() {
                element.scroll_into_view();
            }
            || ()
        });
    }

    html! {
        <section ref={section_ref} id="results" class="results">
            <p id="headline" class="headline">{lookup.headline()}</p>
            <p id="data-note" class="data-note">{lookup.data_note().unwrap_or_default()}</p>
            <TrendChart chart={lookup.chart.clone()} />
        </section>
    }
}
