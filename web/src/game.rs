use apagao_core as game;
use chrono::prelude::*;
use clap::Args;
use gloo::storage::{LocalStorage, Storage};
use gloo::timers::callback::Interval;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

use crate::settings;
use crate::utils::*;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap()
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    Ready,
    Active,
    Won,
    WonOnFirstMove,
}

impl ViewGameState {
    fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::WonOnFirstMove)
    }
}

/// One game from generation to the win banner: the core state plus the
/// bookkeeping the nav bar needs (move count and wall-clock timestamps).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct GameSession {
    pub state: game::GameState,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub move_count: u32,
}

impl GameSession {
    fn new(state: game::GameState) -> Self {
        Self {
            state,
            started_at: None,
            ended_at: None,
            move_count: 0,
        }
    }

    fn generate(seed: u64, config: game::GameConfig) -> Self {
        use game::{BoardGenerator, RandomBoardGenerator};
        Self::new(RandomBoardGenerator::new(seed).generate(config))
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn view_state(&self) -> ViewGameState {
        if self.state.has_won() {
            if self.move_count <= 1 {
                ViewGameState::WonOnFirstMove
            } else {
                ViewGameState::Won
            }
        } else if self.move_count == 0 {
            ViewGameState::Ready
        } else {
            ViewGameState::Active
        }
    }

    /// Plays a move, replacing the held state with the one the move produces.
    /// Moves after the win are dropped here, not in the core.
    fn play(&mut self, coords: game::Coord2, now: DateTime<Utc>) -> bool {
        if self.view_state().is_finished() {
            return false;
        }

        self.state = self.state.apply_move(coords);
        self.on_successful_move(now);
        true
    }

    fn on_successful_move(&mut self, now: DateTime<Utc>) {
        self.move_count = self.move_count.saturating_add(1);

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if self.state.has_won() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
    }
}

impl StorageKey for GameSession {
    const KEY: &'static str = "apagao:game:v1";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Msg {
    CellClicked(game::Coord2),
    UpdateTime,
    NewGame,
    ToggleSettings,
    UpdateSettings(settings::Settings),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    x: game::Coord,
    y: game::Coord,
    lit: bool,
    callback: Callback<game::Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        x,
        y,
        lit,
        callback,
    } = props.clone();

    let class = classes!("cell", lit.then_some("lit"));

    let onclick = Callback::from(move |_: MouseEvent| {
        callback.emit((x, y));
        log::trace!("({}, {}) clicked", x, y);
    });

    html! {
        <td {class} {onclick}/>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: settings::Settings,
    session: GameSession,
    seed: u64,
    prev_time: u32,
    settings_open: bool,
    _timer_interval: Interval,
}

impl GameView {
    fn get_time(&self) -> u32 {
        self.session.elapsed_secs(utc_now())
    }

    fn get_game_state_class(&self) -> Classes {
        classes!(match self.session.view_state() {
            ViewGameState::Ready => "not-started",
            ViewGameState::Active => "in-progress",
            ViewGameState::Won => "win",
            ViewGameState::WonOnFirstMove => "instant-win",
        })
    }

    fn save_session(&self) {
        if let Err(err) = LocalStorage::set(GameSession::KEY, &self.session) {
            log::error!("Could not save game to local storage: {:?}", err);
        }
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings: settings::Settings = LocalOrDefault::local_or_default();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let session = LocalStorage::get(GameSession::KEY)
            .ok()
            .unwrap_or_else(|| GameSession::generate(seed, settings.game_config));

        Self {
            settings,
            session,
            seed,
            prev_time: 0,
            settings_open: false,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            CellClicked(coords) => {
                log::debug!("toggle cell: {:?}", coords);
                self.session.play(coords, utc_now())
            }
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            NewGame => {
                self.seed = js_random_seed();
                self.session = GameSession::generate(self.seed, self.settings.game_config);
                true
            }
            ToggleSettings => {
                self.settings_open = !self.settings_open;
                if !self.settings_open {
                    self.settings = LocalOrDefault::local_or_default();
                }
                true
            }
            UpdateSettings(settings) => {
                if self.settings != settings {
                    self.settings = settings;
                    self.settings.local_save();
                    true
                } else {
                    false
                }
            }
        };

        if updated {
            self.save_session();
        }
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;
        use settings::SettingsView;

        let (cols, rows) = self.session.state.size();
        let view_state = self.session.view_state();
        let game_state_class = self.get_game_state_class();
        let lights_left = format_for_counter(self.session.state.lit_count() as i32);
        let elapsed_time = format_for_counter(self.get_time() as i32);

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_show_settings = ctx.link().callback(|_| ToggleSettings);
        let cb_update_settings = ctx.link().callback(UpdateSettings);

        let board = if view_state.is_finished() {
            // the original arcade flourish
            html! {
                <p class="win-banner">{"$$$ YOU WON $$$"}</p>
            }
        } else {
            html! {
                <table class="playable">
                    {
                        for (0..rows).map(|y| html! {
                            <tr>
                                {
                                    for (0..cols).map(|x| {
                                        let lit = self.session.state.is_lit((x, y));
                                        let callback = ctx.link().callback(CellClicked);
                                        html! {
                                            <CellView {x} {y} {lit} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            }
        };

        html! {
            <div class="apagao" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <small onclick={cb_show_settings}>{"···"}</small>
                <nav>
                    <aside>{lights_left}</aside>
                    <span><button class={game_state_class} onclick={cb_new_game}/></span>
                    <aside>{elapsed_time}</aside>
                </nav>
                { board }
                <SettingsView open={self.settings_open} current={self.settings} on_update={cb_update_settings}/>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(secs * 1000).unwrap()
    }

    fn session(size: game::Coord2, lit: &[game::Coord2]) -> GameSession {
        GameSession::new(game::GameState::from_lit_coords(size, lit).unwrap())
    }

    #[test]
    fn session_moves_drive_ready_active_won() {
        let mut session = session((3, 3), &[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]);
        assert_eq!(session.view_state(), ViewGameState::Ready);

        assert!(session.play((0, 0), t(0)));
        assert_eq!(session.view_state(), ViewGameState::Active);

        assert!(session.play((0, 0), t(1)));
        assert!(session.play((1, 1), t(2)));
        assert_eq!(session.view_state(), ViewGameState::Won);
        assert_eq!(session.move_count, 3);
    }

    #[test]
    fn winning_on_the_first_move_is_derived_in_session_state() {
        let mut session = session((1, 1), &[(0, 0)]);

        assert!(session.play((0, 0), t(0)));

        assert_eq!(session.view_state(), ViewGameState::WonOnFirstMove);
        assert!(session.view_state().is_finished());
    }

    #[test]
    fn moves_after_the_win_are_dropped() {
        let mut session = session((1, 1), &[(0, 0)]);
        session.play((0, 0), t(0));

        assert!(!session.play((0, 0), t(1)));
        assert!(session.state.has_won());
        assert_eq!(session.move_count, 1);
    }

    #[test]
    fn elapsed_time_freezes_at_the_winning_move() {
        let mut session = session((1, 1), &[(0, 0)]);
        assert_eq!(session.elapsed_secs(t(100)), 0);

        session.play((0, 0), t(3));

        assert_eq!(session.elapsed_secs(t(100)), 0);

        let mut longer = GameSession::new(
            game::GameState::from_lit_coords((2, 2), &[(0, 0), (1, 1)]).unwrap(),
        );
        longer.play((0, 0), t(0));
        longer.play((1, 1), t(7));
        assert_eq!(longer.elapsed_secs(t(100)), 7);
    }

    #[test]
    fn session_round_trips_through_the_storage_format() {
        let mut session = session((3, 3), &[(1, 1)]);
        session.play((0, 2), t(5));

        let json = serde_json::to_string(&session).unwrap();
        let restored: GameSession = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, session);
    }

    #[test]
    fn storage_key_is_versioned() {
        assert_eq!(<GameSession as StorageKey>::KEY, "apagao:game:v1");
    }
}
