//! Counters collected while scanning

use crate::config::runtime::ScannerPreferences;
use crate::tokens::{Token, TokenCategory};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default, Clone, Serialize)]
pub struct ScanMetrics {
    pub lines_ingested: usize,
    pub lines_stored: usize,
    pub total_tokens: usize,
    pub category_counts: HashMap<TokenCategory, usize>,
    pub unterminated_literals: usize,
    /// Characters outside every listed class, emitted as one-character delimiters
    pub stray_characters: usize,
    /// Delimiter spelling -> occurrences, when operator tracking is on
    pub operator_usage: BTreeMap<String, usize>,
}

impl ScanMetrics {
    pub(crate) fn record_line(&mut self, stored: bool, preferences: &ScannerPreferences) {
        if !preferences.collect_metrics {
            return;
        }
        self.lines_ingested += 1;
        if stored {
            self.lines_stored += 1;
        }
    }

    pub(crate) fn record_token(&mut self, token: &Token, preferences: &ScannerPreferences) {
        if !preferences.collect_metrics {
            return;
        }

        self.total_tokens += 1;
        *self.category_counts.entry(token.category).or_insert(0) += 1;

        if preferences.track_operator_usage && token.category == TokenCategory::Delimiter {
            *self.operator_usage.entry(token.lexeme.clone()).or_insert(0) += 1;
        }
    }

    pub(crate) fn record_stray(&mut self, preferences: &ScannerPreferences) {
        if preferences.collect_metrics {
            self.stray_characters += 1;
        }
    }

    pub(crate) fn record_unterminated(&mut self, preferences: &ScannerPreferences) {
        if preferences.collect_metrics {
            self.unterminated_literals += 1;
        }
    }

    pub fn count(&self, category: TokenCategory) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }

    /// Lines that produced no tokens
    pub fn blank_lines(&self) -> usize {
        self.lines_ingested - self.lines_stored
    }

    /// Operators ordered by descending use, ties alphabetical
    pub fn most_used_operators(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut usage: Vec<(&str, usize)> = self
            .operator_usage
            .iter()
            .map(|(op, count)| (op.as_str(), *count))
            .collect();
        usage.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        usage.truncate(limit);
        usage
    }

    /// One `category: count` entry per produced category, in display order
    pub fn summary_lines(&self) -> Vec<String> {
        TokenCategory::PRODUCED
            .iter()
            .map(|category| format!("{}: {}", category, self.count(*category)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn prefs(track_operators: bool) -> ScannerPreferences {
        ScannerPreferences {
            collect_metrics: true,
            record_original_lines: true,
            track_operator_usage: track_operators,
            log_each_line: false,
        }
    }

    #[test]
    fn counts_by_category() {
        let mut metrics = ScanMetrics::default();
        let p = prefs(false);
        metrics.record_token(&Token::identifier("a", Position::start()), &p);
        metrics.record_token(&Token::identifier("b", Position::start()), &p);
        metrics.record_token(&Token::delimiter("+", Position::start()), &p);

        assert_eq!(metrics.total_tokens, 3);
        assert_eq!(metrics.count(TokenCategory::Identifier), 2);
        assert_eq!(metrics.count(TokenCategory::Delimiter), 1);
        assert_eq!(metrics.count(TokenCategory::Char), 0);
        assert!(metrics.operator_usage.is_empty());
    }

    #[test]
    fn operator_histogram_orders_by_use() {
        let mut metrics = ScanMetrics::default();
        let p = prefs(true);
        for op in ["+", ";", ";", "==", ";", "+"] {
            metrics.record_token(&Token::delimiter(op, Position::start()), &p);
        }

        assert_eq!(
            metrics.most_used_operators(2),
            vec![(";", 3), ("+", 2)]
        );
    }

    #[test]
    fn disabled_metrics_record_nothing() {
        let mut metrics = ScanMetrics::default();
        let p = ScannerPreferences {
            collect_metrics: false,
            ..prefs(true)
        };
        metrics.record_token(&Token::delimiter("+", Position::start()), &p);
        metrics.record_line(true, &p);
        metrics.record_stray(&p);
        metrics.record_unterminated(&p);

        assert_eq!(metrics.total_tokens, 0);
        assert_eq!(metrics.lines_ingested, 0);
        assert_eq!(metrics.lines_stored, 0);
        assert_eq!(metrics.stray_characters, 0);
        assert_eq!(metrics.unterminated_literals, 0);
        assert!(metrics.operator_usage.is_empty());
    }

    #[test]
    fn blank_lines_are_ingested_minus_stored() {
        let mut metrics = ScanMetrics::default();
        let p = prefs(false);
        metrics.record_line(true, &p);
        metrics.record_line(false, &p);
        metrics.record_line(false, &p);
        assert_eq!(metrics.blank_lines(), 2);
    }
}
