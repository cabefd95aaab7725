// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// ADX quantifies trend strength regardless of direction.
//
//   1. +DM, -DM and True Range per bar against the previous bar.
//   2. Wilder-smooth each over `period` bars.
//   3. +DI = smoothed(+DM) / smoothed(TR) * 100, likewise -DI.
//   4. DX  = |+DI - -DI| / (+DI + -DI) * 100
//   5. ADX = mean of the first `period` DX values, Wilder-smoothed after that.
//
// DI is defined from index `period`; ADX from index `2 * period - 1`.
// Zero denominators are replaced with DX_EPSILON.
// =============================================================================

use crate::indicators::ta::{Next, WilderAverage};
use crate::indicators::volatility::directional_movement;
use crate::models::Series;
use serde::Serialize;

pub const DX_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdxSeries {
    pub adx: Series,
    pub plus_di: Series,
    pub minus_di: Series,
}

fn guarded(denominator: f64) -> f64 {
    if denominator == 0.0 {
        DX_EPSILON
    } else {
        denominator
    }
}

pub fn adx(high: &[f64], low: &[f64], close: &[f64], period: usize) -> AdxSeries {
    let len = close.len().min(high.len()).min(low.len());
    let mut out = AdxSeries {
        adx: vec![None; len],
        plus_di: vec![None; len],
        minus_di: vec![None; len],
    };

    let (Ok(mut tr_avg), Ok(mut plus_avg), Ok(mut minus_avg), Ok(mut adx_avg)) = (
        WilderAverage::new(period),
        WilderAverage::new(period),
        WilderAverage::new(period),
        WilderAverage::new(period),
    ) else {
        return out;
    };

    let dm = directional_movement(high, low, close);

    for i in 1..len {
        let smoothed = (
            tr_avg.next(dm.true_range[i]),
            plus_avg.next(dm.plus_dm[i]),
            minus_avg.next(dm.minus_dm[i]),
        );

        let (Some(tr), Some(plus), Some(minus)) = smoothed else {
            continue;
        };

        let tr = guarded(tr);
        let plus_di = 100.0 * plus / tr;
        let minus_di = 100.0 * minus / tr;
        let dx = 100.0 * (plus_di - minus_di).abs() / guarded(plus_di + minus_di);

        out.plus_di[i] = Some(plus_di);
        out.minus_di[i] = Some(minus_di);
        out.adx[i] = adx_avg.next(dx);
    }

    out
}
