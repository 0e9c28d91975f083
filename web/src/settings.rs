use apagao_core as game;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::theme::Theme;
use crate::utils::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub game_config: game::GameConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_config: game::GameConfig::default(),
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "apagao:settings";
}

/// Board presets offered in the settings dialog. A selected preset only takes
/// effect for the next new game.
pub(crate) const PRESETS: &[(&str, game::GameConfig)] = &[
    ("Classic", game::GameConfig::new_unchecked((3, 3), 0.1)),
    ("Bright start", game::GameConfig::new_unchecked((3, 3), 0.5)),
    ("Five by five", game::GameConfig::new_unchecked((5, 5), 0.35)),
    ("Marquee", game::GameConfig::new_unchecked((9, 5), 0.25)),
];

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub current: Settings,
    pub on_update: Callback<Settings>,
}

#[function_component(SettingsView)]
pub(crate) fn settings_view(props: &SettingsProps) -> Html {
    let presets = PRESETS.iter().map(|&(name, game_config)| {
        let on_update = props.on_update.clone();
        let selected = props.current.game_config == game_config;
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_update.emit(Settings { game_config });
        });
        html! {
            <li><a href="#" class={selected.then_some("selected")} {onclick}>{name}</a></li>
        }
    });

    let themes = [
        ("Auto", Theme::Auto),
        ("Light", Theme::Light),
        ("Dark", Theme::Dark),
    ]
    .map(|(label, theme)| {
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            Theme::apply(theme);
        });
        let scheme = theme.scheme().unwrap_or("auto");
        html! {
            <li><a href="#" data-theme-switcher={scheme} {onclick}>{label}</a></li>
        }
    });

    html! {
        <dialog id="settings" open={props.open}>
            <article>
                <h2>{"Settings"}</h2>
                <h3>{"Board"}</h3>
                <ul>{ for presets }</ul>
                <h3>{"Theme"}</h3>
                <ul>{ for themes }</ul>
            </article>
        </dialog>
    }
}
