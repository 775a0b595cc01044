use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ai::solver::Solution;
use crate::board::{Board, BoardConfig};
use crate::game::GameInstance;
use crate::types::{MoveResult, Square};

/// Game handle owned by the page. Each handle is an independent game.
#[wasm_bindgen]
pub struct IcebreakerGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl IcebreakerGame {
    /// `config` is `{ width, height }`; `undefined` or `null` picks the 8x5 board.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<IcebreakerGame, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            BoardConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        let board = Board::from_config(config).map_err(to_js_error)?;

        Ok(Self {
            inner: GameInstance::new_with_default_selector(board),
        })
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Array of `{ x, y }` squares the rook may move to.
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.legal_moves())
    }

    /// Illegal requests are not errors: they come back with `accepted: false`.
    pub fn apply_move(&mut self, x: u8, y: u8) -> Result<JsValue, JsValue> {
        let outcome = self.inner.apply_move(Square::new(x, y));
        to_js(&MoveResult::from(outcome))
    }

    pub fn status(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        self.inner.do_ai_move().map_err(to_js_error)?;
        to_js(&self.inner.to_game_state())
    }

    /// Perfect-play analysis for the side to move.
    pub fn hint(&self) -> Result<JsValue, JsValue> {
        let analysis = Solution::for_board(self.inner.board()).analyze(self.inner.rook());
        to_js(&analysis)
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
