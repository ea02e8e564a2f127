//! Handlebars helpers for number formatting in the report template.

use handlebars::{Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext};

use crate::report::{fmt_delta, fmt_pct};

/// # percentage formatting helper
/// Formats a pace percentage with two decimals; `null` renders as an empty cell.
///
/// ### usage
/// ```handlebars
/// {{pct this}}
/// ```
#[derive(Clone, Copy)]
pub struct Pct;

impl HelperDef for Pct {
    fn call<'reg: 'rc, 'rc>(
        &self,
        helper: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let Some(param) = helper.param(0) else {
            return Ok(());
        };
        out.write(&fmt_pct(param.value().as_f64()))?;
        Ok(())
    }
}

/// # signed delta formatting helper
/// Formats an improvement delta with an explicit sign.
///
/// ### usage
/// ```handlebars
/// {{signed delta}}
/// ```
#[derive(Clone, Copy)]
pub struct Signed;

impl HelperDef for Signed {
    fn call<'reg: 'rc, 'rc>(
        &self,
        helper: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        if let Some(v) = helper.param(0).and_then(|p| p.value().as_f64()) {
            out.write(&fmt_delta(v))?;
        }
        Ok(())
    }
}
