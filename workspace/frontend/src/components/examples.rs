use common::{display_name, CountyFips, IndustryCode};
use yew::prelude::*;

/// Preset (county, industry) pair offered as a one-click search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Example {
    pub label: &'static str,
    pub county: &'static str,
    pub industry: &'static str,
}

pub const EXAMPLES: &[Example] = &[
    Example { label: "Book stores in Los Angeles", county: "06037", industry: "4512" },
    Example { label: "Banks in Cook County", county: "17031", industry: "5221" },
    Example { label: "Restaurants in Harris County", county: "48201", industry: "7225" },
    Example { label: "Legal services in Philadelphia", county: "42101", industry: "5411" },
];

impl Example {
    pub fn ids(&self) -> Option<(CountyFips, IndustryCode)> {
        let county = CountyFips::parse(self.county).ok()?;
        let industry = IndustryCode::parse(self.industry).ok()?;
        Some((county, industry))
    }
}

#[derive(Properties, PartialEq)]
pub struct ExampleButtonsProps {
    pub on_select: Callback<(CountyFips, IndustryCode)>,
}

#[function_component(ExampleButtons)]
pub fn example_buttons(props: &ExampleButtonsProps) -> Html {
    let render = |example: &Example| {
        let Some((county, industry)) = example.ids() else {
            return html! {};
        };
        let title = display_name(&industry);
        let onclick = {
            let on_select = props.on_select.clone();
            Callback::from(move |_: MouseEvent| on_select.emit((county.clone(), industry.clone())))
        };
        html! {
            <button class="example-btn" {title} {onclick}>{example.label}</button>
        }
    };

    html! {
        <div class="examples">
            <span class="examples-label">{"Try:"}</span>
            { for EXAMPLES.iter().map(render) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::industry_name;

    #[test]
    fn test_examples_use_catalogue_industries() {
        for example in EXAMPLES {
            let (_, industry) = example.ids().expect("valid example ids");
            assert!(industry_name(&industry).is_some(), "{} not in catalogue", example.industry);
        }
    }
}
