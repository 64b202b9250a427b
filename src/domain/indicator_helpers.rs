//! Shared statistical helpers for indicator and risk calculations.
//!
//! Every helper returns `None` instead of NaN or infinity when its input
//! cannot produce a finite answer.

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64).filter(|m| m.is_finite())
}

/// Sample standard deviation (n-1 divisor); `None` below two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt()).filter(|sd| sd.is_finite())
}

/// Quantile `q` in `[0, 1]` with linear interpolation between order
/// statistics (position `(n-1)*q`).
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !q.is_finite() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let h = (sorted.len() - 1) as f64 * q;
    let lower = h.floor() as usize;
    let upper = h.ceil() as usize;
    let frac = h - lower as f64;
    let value = if frac == 0.0 {
        sorted[lower]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * frac
    };
    Some(value).filter(|v| v.is_finite())
}

/// Pearson correlation of two equal-length samples.
///
/// `None` when lengths differ, fewer than two pairs exist, or either sample
/// has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
