/// Ordered list of named candidate sources for one financial metric.
///
/// Sources are tried in insertion order; the first present finite value wins.
/// A chain that resolves to nothing yields `None`, never a raw NaN.
///
/// ```rust
/// use contracts::domain::a001_vendor::metric_source::MetricChain;
///
/// let resolved = MetricChain::new("debt_to_equity")
///     .source("financialRatios.debt_to_equity", None)
///     .source("debtToEquity", Some(0.8))
///     .resolve();
/// assert_eq!(resolved.value, Some(0.8));
/// assert_eq!(resolved.source, Some("debtToEquity"));
/// ```
#[derive(Debug, Clone)]
pub struct MetricChain {
    metric: &'static str,
    candidates: Vec<(&'static str, Option<f64>)>,
}

/// Outcome of a chain: the value and which source supplied it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMetric {
    pub metric: &'static str,
    pub value: Option<f64>,
    pub source: Option<&'static str>,
}

impl ResolvedMetric {
    pub fn is_missing(&self) -> bool {
        self.value.is_none()
    }

    /// Value for aggregate math, where a missing metric counts as zero
    pub fn or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

impl MetricChain {
    pub fn new(metric: &'static str) -> Self {
        Self {
            metric,
            candidates: Vec::new(),
        }
    }

    pub fn source(mut self, label: &'static str, value: Option<f64>) -> Self {
        self.candidates.push((label, value));
        self
    }

    /// Lazily computed source, evaluated only if every earlier source is missing
    pub fn source_with<F>(self, label: &'static str, compute: F) -> Self
    where
        F: FnOnce() -> Option<f64>,
    {
        if self.first_present().is_some() {
            self
        } else {
            let value = compute();
            self.source(label, value)
        }
    }

    pub fn resolve(&self) -> ResolvedMetric {
        match self.first_present() {
            Some((label, value)) => ResolvedMetric {
                metric: self.metric,
                value: Some(value),
                source: Some(label),
            },
            None => ResolvedMetric {
                metric: self.metric,
                value: None,
                source: None,
            },
        }
    }

    fn first_present(&self) -> Option<(&'static str, f64)> {
        self.candidates
            .iter()
            .find_map(|(label, value)| value.filter(|v| v.is_finite()).map(|v| (*label, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_present_wins() {
        let resolved = MetricChain::new("current_ratio")
            .source("a", Some(1.2))
            .source("b", Some(3.0))
            .resolve();
        assert_eq!(resolved.value, Some(1.2));
        assert_eq!(resolved.source, Some("a"));
    }

    #[test]
    fn test_non_finite_is_skipped() {
        let resolved = MetricChain::new("cash_ratio")
            .source("a", Some(f64::NAN))
            .source("b", Some(f64::INFINITY))
            .source("c", Some(0.04))
            .resolve();
        assert_eq!(resolved.value, Some(0.04));
        assert_eq!(resolved.source, Some("c"));
    }

    #[test]
    fn test_all_missing_is_explicit_none() {
        let resolved = MetricChain::new("debt_to_equity")
            .source("a", None)
            .source("b", None)
            .resolve();
        assert!(resolved.is_missing());
        assert_eq!(resolved.source, None);
        assert_eq!(resolved.or_zero(), 0.0);
    }

    #[test]
    fn test_lazy_source_not_evaluated_when_earlier_present() {
        let mut called = false;
        let resolved = MetricChain::new("x")
            .source("a", Some(1.0))
            .source_with("b", || {
                called = true;
                Some(2.0)
            })
            .resolve();
        assert_eq!(resolved.value, Some(1.0));
        assert!(!called);
    }
}
