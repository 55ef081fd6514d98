use common::{CountyDto, CountyFips, IndustryCode};
use compute::{Lookup, LookupRequest};
use std::rc::Rc;
use yew::prelude::*;

use super::county_search::CountySearch;
use super::examples::ExampleButtons;
use super::industry_select::IndustrySelect;
use super::results::Results;
use crate::api_client::{load_tables, SharedTables, LOAD_FAILED_MESSAGE};
use crate::hooks::FetchState;

/// Runs one search and turns lookup failures into the message shown to
/// the user.
fn run_search(tables: &SharedTables, request: &LookupRequest) -> Result<Lookup, String> {
    tables.handle_request(request).map_err(|e| {
        log::debug!("Search failed ({}): {}", e.code(), e);
        e.to_string()
    })
}

#[function_component(Calculator)]
pub fn calculator() -> Html {
    let tables = use_state(|| FetchState::<SharedTables>::Loading);
    let industry = use_state(|| None::<IndustryCode>);
    let county_text = use_state(String::new);
    let selected_county = use_state(|| None::<CountyFips>);
    let outcome = use_state(|| None::<Result<Lookup, String>>);

    // Load both tables on mount
    {
        let tables = tables.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match load_tables().await {
                    Ok(loaded) => tables.set(FetchState::Success(SharedTables(Rc::new(loaded)))),
                    Err(err) => {
                        log::error!("Failed to load data: {}", err);
                        tables.set(FetchState::Error(LOAD_FAILED_MESSAGE.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let on_industry_change = {
        let industry = industry.clone();
        Callback::from(move |code: Option<IndustryCode>| industry.set(code))
    };

    let on_county_input = {
        let county_text = county_text.clone();
        let selected_county = selected_county.clone();
        Callback::from(move |text: String| {
            county_text.set(text);
            selected_county.set(None);
        })
    };

    let on_county_pick = {
        let county_text = county_text.clone();
        let selected_county = selected_county.clone();
        Callback::from(move |county: CountyDto| {
            log::debug!("Selected county {} ({})", county.name, county.fips);
            county_text.set(county.name);
            selected_county.set(Some(county.fips));
        })
    };

    let on_search = {
        let tables = tables.clone();
        let industry = industry.clone();
        let county_text = county_text.clone();
        let selected_county = selected_county.clone();
        let outcome = outcome.clone();
        Callback::from(move |_: ()| {
            let Some(loaded) = tables.data() else {
                return;
            };
            let request = LookupRequest {
                industry: (*industry).clone(),
                selected_county: (*selected_county).clone(),
                county_text: (*county_text).clone(),
            };
            let result = run_search(loaded, &request);
            if let Ok(lookup) = &result {
                selected_county.set(Some(lookup.county_fips.clone()));
            }
            outcome.set(Some(result));
        })
    };

    let on_example = {
        let tables = tables.clone();
        let industry = industry.clone();
        let county_text = county_text.clone();
        let selected_county = selected_county.clone();
        let outcome = outcome.clone();
        Callback::from(move |(fips, code): (CountyFips, IndustryCode)| {
            let Some(loaded) = tables.data() else {
                return;
            };
            let text = loaded
                .counties
                .find(&fips)
                .map(|county| county.name.clone())
                .unwrap_or_default();
            let request = LookupRequest {
                industry: Some(code.clone()),
                selected_county: Some(fips.clone()),
                county_text: text.clone(),
            };
            industry.set(Some(code));
            county_text.set(text);
            selected_county.set(Some(fips));
            outcome.set(Some(run_search(loaded, &request)));
        })
    };

    let on_click_search = {
        let on_search = on_search.clone();
        Callback::from(move |_: MouseEvent| on_search.emit(()))
    };

    let form = match &*tables {
        FetchState::Success(loaded) => html! {
            <>
                <div class="search-form">
                    <IndustrySelect value={(*industry).clone()} on_change={on_industry_change} />
                    <CountySearch
                        tables={loaded.clone()}
                        value={(*county_text).clone()}
                        on_input={on_county_input}
                        on_pick={on_county_pick}
                        on_submit={on_search.clone()}
                    />
                    <button id="search-btn" class="btn btn-primary" onclick={on_click_search}>
                        {"Find the peak"}
                    </button>
                </div>
                <ExampleButtons on_select={on_example} />
            </>
        },
        FetchState::Loading | FetchState::NotStarted => html! {
            <div class="loading">{"Loading data..."}</div>
        },
        FetchState::Error(_) => html! {},
    };

    let message = tables
        .error()
        .cloned()
        .or_else(|| match &*outcome {
            Some(Err(err)) => Some(err.clone()),
            _ => None,
        });

    html! {
        <main class="calculator">
            <header>
                <h1>{"Peak Business Calculator"}</h1>
                <p class="subtitle">{"When did your industry peak in your county?"}</p>
            </header>
            {form}
            if let Some(message) = message {
                <div id="error" class="error">{message}</div>
            }
            if let Some(Ok(lookup)) = &*outcome {
                <Results lookup={lookup.clone()} />
            }
            <footer class="source">
                {"Source: U.S. Census Bureau, County Business Patterns."}
            </footer>
        </main>
    }
}
