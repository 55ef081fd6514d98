use common::{IndustryCode, INDUSTRIES};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct IndustrySelectProps {
    pub value: Option<IndustryCode>,
    pub on_change: Callback<Option<IndustryCode>>,
}

#[function_component(IndustrySelect)]
pub fn industry_select(props: &IndustrySelectProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(target) = e.target_dyn_into::<HtmlSelectElement>() {
                let value = target.value();
                if value.is_empty() {
                    on_change.emit(None);
                } else {
                    match IndustryCode::parse(&value) {
                        Ok(code) => on_change.emit(Some(code)),
                        Err(err) => log::warn!("Ignoring industry option {:?}: {}", value, err),
                    }
                }
            }
        })
    };

    let selected = props.value.as_ref().map(IndustryCode::as_str);

    html! {
        <div class="input-group">
            <label for="industry-select">{"Industry"}</label>
            <select id="industry-select" {onchange}>
                <option value="" selected={selected.is_none()}>{"Select an industry..."}</option>
                { for INDUSTRIES.iter().map(|industry| html! {
                    <option
                        value={industry.code}
                        selected={selected == Some(industry.code)}
                    >
                        {industry.name}
                    </option>
                }) }
            </select>
        </div>
    }
}
