use common::CountyDto;
use compute::DEFAULT_SUGGESTION_LIMIT;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::SharedTables;

/// Suggestion list under the county input and its keyboard highlight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    items: Vec<CountyDto>,
    open: bool,
    highlighted: Option<usize>,
}

/// What a key press in the county input asks for
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// Not a navigation key; let the browser handle it
    Ignored,
    /// Highlight moved or list closed; suppress the default action
    Handled,
    /// Enter on a highlighted suggestion
    Pick(CountyDto),
    /// Enter with the list closed
    Search,
}

impl Suggestions {
    /// Matches for `query`, open when there is at least one.
    pub fn for_query(tables: &SharedTables, query: &str) -> Self {
        let items: Vec<CountyDto> = tables
            .counties
            .search(query, DEFAULT_SUGGESTION_LIMIT)
            .into_iter()
            .cloned()
            .collect();
        let open = !items.is_empty();
        Self {
            items,
            open,
            highlighted: None,
        }
    }

    pub fn items(&self) -> &[CountyDto] {
        &self.items
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = None;
    }

    pub fn handle_key(&mut self, key: &str) -> KeyAction {
        if !self.open || self.items.is_empty() {
            return if key == "Enter" {
                KeyAction::Search
            } else {
                KeyAction::Ignored
            };
        }

        let last = self.items.len() - 1;
        match key {
            "ArrowDown" => {
                self.highlighted = match self.highlighted {
                    Some(i) if i < last => Some(i + 1),
                    _ => Some(0),
                };
                KeyAction::Handled
            }
            "ArrowUp" => {
                self.highlighted = match self.highlighted {
                    Some(i) if i > 0 => Some(i - 1),
                    _ => Some(last),
                };
                KeyAction::Handled
            }
            "Enter" => match self.highlighted.and_then(|i| self.items.get(i)).cloned() {
                Some(county) => {
                    self.close();
                    KeyAction::Pick(county)
                }
                None => KeyAction::Handled,
            },
            "Escape" => {
                self.close();
                KeyAction::Handled
            }
            _ => KeyAction::Ignored,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct CountySearchProps {
    pub tables: SharedTables,
    /// Current text of the input
    pub value: String,
    /// Fired on every edit; the selection no longer matches the text
    pub on_input: Callback<String>,
    pub on_pick: Callback<CountyDto>,
    pub on_submit: Callback<()>,
}

#[function_component(CountySearch)]
pub fn county_search(props: &CountySearchProps) -> Html {
    let suggestions = use_state(Suggestions::default);

    let oninput = {
        let suggestions = suggestions.clone();
        let tables = props.tables.clone();
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            suggestions.set(Suggestions::for_query(&tables, &value));
            on_input.emit(value);
        })
    };

    let onfocus = {
        let suggestions = suggestions.clone();
        let tables = props.tables.clone();
        let value = props.value.clone();
        Callback::from(move |_: FocusEvent| {
            suggestions.set(Suggestions::for_query(&tables, &value));
        })
    };

    let onblur = {
        let suggestions = suggestions.clone();
        Callback::from(move |_: FocusEvent| {
            let mut next = (*suggestions).clone();
            next.close();
            suggestions.set(next);
        })
    };

    let onkeydown = {
        let suggestions = suggestions.clone();
        let on_pick = props.on_pick.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            let mut next = (*suggestions).clone();
            let action = next.handle_key(&e.key());
            log::trace!("County input key {:?} -> {:?}", e.key(), action);
            match action {
                KeyAction::Ignored => {}
                KeyAction::Handled => e.prevent_default(),
                KeyAction::Pick(county) => {
                    e.prevent_default();
                    on_pick.emit(county);
                }
                KeyAction::Search => on_submit.emit(()),
            }
            suggestions.set(next);
        })
    };

    let render_item = |(i, county): (usize, &CountyDto)| {
        let onmousedown = {
            let suggestions = suggestions.clone();
            let on_pick = props.on_pick.clone();
            let county = county.clone();
            // mousedown fires before the input's blur closes the list
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                let mut next = (*suggestions).clone();
                next.close();
                suggestions.set(next);
                on_pick.emit(county.clone());
            })
        };
        let class = if suggestions.highlighted() == Some(i) {
            "autocomplete-item selected"
        } else {
            "autocomplete-item"
        };
        html! {
            <div class={class} key={county.fips.to_string()} {onmousedown}>
                <span class="county-name">{&county.name}</span>
            </div>
        }
    };

    html! {
        <div class="input-group">
            <label for="county-search">{"County"}</label>
            <input
                id="county-search"
                type="text"
                placeholder="Start typing a county name..."
                autocomplete="off"
                value={props.value.clone()}
                {oninput}
                {onfocus}
                {onblur}
                {onkeydown}
            />
            if suggestions.is_open() {
                <div class="autocomplete-list active">
                    { for suggestions.items().iter().enumerate().map(render_item) }
                </div>
            }
        </div>
    }
}
