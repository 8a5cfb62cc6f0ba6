//! Report rendering for scan results.
//!
//! Generates reports in two formats:
//! - Table (terminal, optionally colored)
//! - JSON (for piping into other tools)
//!
//! Rendering never touches the core data: styling is applied here only,
//! and each signal's `reason` is printed as-is.

use chrono::{DateTime, Local};
use console::Style;
use serde::{Deserialize, Serialize};

use crate::data::MarketSnapshot;

use super::engine::ScanResult;
use super::signal::{SignalResult, MAX_STRENGTH};
use super::statistics::ScanStatistics;

const LINE_WIDTH: usize = 90;

/// Rows shown per signal table when not configured.
pub const DEFAULT_DISPLAY_LIMIT: usize = 8;

// ============================================================================
// Report Format
// ============================================================================

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Terminal tables (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

// ============================================================================
// Formatting helpers
// ============================================================================

/// Rupiah price without decimals, e.g. `Rp 9800`.
pub fn format_price(price: f64) -> String {
    format!("Rp {:.0}", price)
}

/// Compact share volume: `1.5K`, `2.3M`, `1.2B`; plain below a thousand.
pub fn format_volume(volume: u64) -> String {
    let v = volume as f64;
    if volume >= 1_000_000_000 {
        format!("{:.1}B", v / 1_000_000_000.0)
    } else if volume >= 1_000_000 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if volume >= 1_000 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        volume.to_string()
    }
}

/// Strength as a five-character star bar, e.g. `***  `.
pub fn stars(count: u8) -> String {
    let filled = count.min(MAX_STRENGTH) as usize;
    format!(
        "{}{}",
        "*".repeat(filled),
        " ".repeat(MAX_STRENGTH as usize - filled)
    )
}

/// First `max` characters of `s`.
fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn rule(ch: char) -> String {
    ch.to_string().repeat(LINE_WIDTH)
}

// ============================================================================
// Renderer
// ============================================================================

/// Terminal renderer.
#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    display_limit: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(true, DEFAULT_DISPLAY_LIMIT)
    }
}

impl Renderer {
    pub fn new(color: bool, display_limit: usize) -> Self {
        Self {
            color,
            display_limit,
        }
    }

    /// Renderer for stdout: colors only when requested and stdout is a
    /// color-capable terminal.
    pub fn for_stdout(color: bool, display_limit: usize) -> Self {
        Self::new(color && console::colors_enabled(), display_limit)
    }

    /// Renderer that never emits escape codes.
    pub fn plain(display_limit: usize) -> Self {
        Self::new(false, display_limit)
    }

    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    fn paint(&self, style: Style, text: impl std::fmt::Display) -> String {
        if self.color {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Program banner with the local time.
    pub fn header(&self, now: DateTime<Local>) -> String {
        let mut out = String::new();
        out.push_str(&rule('='));
        out.push('\n');
        out.push_str(&self.paint(
            Style::new().bold(),
            "                    STOCK SCANNER - BUY AFTERNOON, SELL MORNING",
        ));
        out.push('\n');
        out.push_str("                      Indonesia Stock Exchange (IDX)\n");
        out.push_str(&rule('='));
        out.push('\n');
        out.push_str(&format!(" Time: {}\n", now.format("%a %d %b %Y %H:%M:%S")));
        out.push_str(&rule('-'));
        out.push_str("\n\n");
        out
    }

    fn reason_line(&self, signal: &SignalResult) -> String {
        format!("         {}\n", self.paint(Style::new().dim(), &signal.reason))
    }

    /// Buy-in-the-afternoon table.
    pub fn buy_table(&self, signals: &[SignalResult]) -> String {
        let mut out = String::new();
        out.push_str(&self.paint(
            Style::new().green().bold(),
            "                         AFTERNOON BUY SIGNALS",
        ));
        out.push('\n');
        out.push_str(" Buy into the close (14:30-15:00 WIB)\n");
        out.push_str(&rule('-'));
        out.push('\n');

        if signals.is_empty() {
            out.push_str(" No buy signals right now.\n");
            return out;
        }

        out.push_str(&format!(
            "{:<8}{:<22}{:<12}{:<12}{:<12}{:<8}{:<6}{:<6}\n",
            " CODE", "NAME", "PRICE", "TARGET", "SL", "GAIN", "R:R", "RATE"
        ));
        out.push_str(&rule('-'));
        out.push('\n');

        for signal in signals.iter().take(self.display_limit) {
            out.push_str(&format!(
                " {:<7}{:<22}{:<12}{:<12}{:<12}{:<8}{:<6}{}\n",
                signal.symbol,
                truncate(&signal.name, 19),
                format_price(signal.current_price),
                format_price(signal.target_price),
                format_price(signal.stop_loss),
                format!("{:.1}%", signal.potential_gain),
                format!("{:.2}", signal.risk_reward),
                self.paint(Style::new().yellow(), stars(signal.strength)),
            ));
            out.push_str(&self.reason_line(signal));
        }
        out.push('\n');
        out
    }

    /// Sell-in-the-morning table.
    pub fn sell_table(&self, signals: &[SignalResult]) -> String {
        let mut out = String::new();
        out.push_str(&self.paint(
            Style::new().red().bold(),
            "                         MORNING SELL SIGNALS",
        ));
        out.push('\n');
        out.push_str(" Sell into the open (09:00-09:30 WIB)\n");
        out.push_str(&rule('-'));
        out.push('\n');

        if signals.is_empty() {
            out.push_str(" No sell signals right now.\n");
            return out;
        }

        out.push_str(&format!(
            "{:<8}{:<22}{:<12}{:<12}{:<9}{:<6}{:<6}\n",
            " CODE", "NAME", "PRICE", "EXP.OPEN", "GAP", "R:R", "RATE"
        ));
        out.push_str(&rule('-'));
        out.push('\n');

        for signal in signals.iter().take(self.display_limit) {
            out.push_str(&format!(
                " {:<7}{:<22}{:<12}{:<12}{:<9}{:<6}{}\n",
                signal.symbol,
                truncate(&signal.name, 19),
                format_price(signal.current_price),
                format_price(signal.target_price),
                format!("{:.1}%", signal.potential_gain),
                format!("{:.2}", signal.risk_reward),
                self.paint(Style::new().yellow(), stars(signal.strength)),
            ));
            out.push_str(&self.reason_line(signal));
        }
        out.push('\n');
        out
    }

    /// Every snapshot in the universe with both scores.
    pub fn stocks_table(&self, snapshots: &[MarketSnapshot]) -> String {
        let mut out = String::new();
        out.push_str("                           ALL STOCKS\n");
        out.push_str(&rule('-'));
        out.push('\n');
        out.push_str(&format!(
            "{:<8}{:<18}{:<10}{:<8}{:<8}{:<6}{:<8}{:<8}\n",
            " CODE", "NAME", "CLOSE", "CHG%", "VOL", "RSI", "BUY", "SELL"
        ));
        out.push_str(&rule('-'));
        out.push('\n');

        for s in snapshots {
            let change = format!("{:<8}", format!("{:.1}%", s.change_percent));
            let change = if s.is_advancer() {
                self.paint(Style::new().green(), change)
            } else {
                self.paint(Style::new().red(), change)
            };

            out.push_str(&format!(
                " {:<7}{:<18}{:<10}{}{:<8}{:<6}{:<8}{:<8}\n",
                s.symbol,
                truncate(&s.name, 15),
                format_price(s.close),
                change,
                format_volume(s.volume),
                format!("{:.0}", s.rsi),
                format!("{:.0}", s.afternoon_score.unwrap_or(0.0)),
                format!("{:.0}", s.morning_score.unwrap_or(0.0)),
            ));
        }
        out
    }

    /// Both signal tables.
    pub fn signals(&self, result: &ScanResult) -> String {
        let mut out = self.buy_table(&result.buy_signals);
        out.push('\n');
        out.push_str(&self.sell_table(&result.sell_signals));
        out
    }

    /// Counts, strength breakdown and funnel for one scan.
    pub fn statistics(&self, stats: &ScanStatistics, result: &ScanResult) -> String {
        let mut out = String::new();
        out.push_str("                           SCAN STATISTICS\n");
        out.push_str(&rule('-'));
        out.push_str("\n\n");
        out.push_str(&format!(" Stocks scanned       : {}\n", stats.total_scanned));
        out.push_str(&format!(" Buy signals          : {}\n", stats.buy_signals));
        out.push_str(&format!(" Sell signals         : {}\n", stats.sell_signals));
        out.push_str(&format!(
            " Advancers / Decliners: {} / {}\n",
            stats.advancers, stats.decliners
        ));
        out.push_str(&format!(
            " Avg buy / sell score : {:.1} / {:.1}\n\n",
            stats.avg_afternoon_score, stats.avg_morning_score
        ));

        out.push_str(" Strength breakdown:\n");
        out.push_str(&format!("   {:<8}{:<6}{:<6}\n", "RATE", "BUY", "SELL"));
        for strength in (1..=MAX_STRENGTH).rev() {
            out.push_str(&format!(
                "   {:<8}{:<6}{:<6}\n",
                stars(strength),
                stats.buys_with_strength(strength),
                stats.sells_with_strength(strength)
            ));
        }
        out.push('\n');

        for (label, funnel) in [("Buy", &result.buy_funnel), ("Sell", &result.sell_funnel)] {
            out.push_str(&format!(" {} funnel:\n", label));
            for stage in &funnel.stages {
                out.push_str(&format!(
                    "   {:<15} passed {:>3}  eliminated {:>3} ({:.1}%)\n",
                    stage.stage.to_string(),
                    stage.passed,
                    stage.eliminated,
                    stage.elimination_rate
                ));
            }
        }
        out.push('\n');
        out
    }

    /// How the strategy is meant to be traded.
    pub fn strategy_guide(&self) -> String {
        let heading = |text: &str| self.paint(Style::new().cyan().bold(), text);
        let mut out = String::new();
        out.push_str("                         STRATEGY GUIDE\n");
        out.push_str(&rule('-'));
        out.push_str("\n\n");
        out.push_str(&format!(" {}\n", heading("CONCEPT:")));
        out.push_str(" Trade the overnight gap: prices move while the market is closed\n");
        out.push_str(" on news and global sentiment.\n\n");
        out.push_str(&format!(" {}\n", heading("TIMING:")));
        out.push_str(" BUY   -> 14:30 - 15:00 WIB (before the close)\n");
        out.push_str(" SELL  -> 09:00 - 09:30 WIB (after the open)\n\n");
        out.push_str(&format!(" {}\n", heading("BUY CRITERIA:")));
        out.push_str(" - RSI < 40 (oversold)\n");
        out.push_str(" - Price below SMA20\n");
        out.push_str(" - Volume above average\n");
        out.push_str(" - Down -0.5% to -3% on the day\n\n");
        out.push_str(&format!(" {}\n", heading("SELL CRITERIA:")));
        out.push_str(" - RSI > 60 (overbought)\n");
        out.push_str(" - Gap up at the open\n");
        out.push_str(" - Take profit 0.5% - 2%\n");
        out.push_str(" - Stop loss -2%\n\n");
        out.push_str(&format!(" {}\n", heading("RISK:")));
        out.push_str(" - At most 3-5 stocks per day\n");
        out.push_str(" - 10-20% allocation per stock\n");
        out.push_str(" - Always set a stop loss\n\n");
        out
    }
}

// ============================================================================
// Scan Report
// ============================================================================

/// Report generator for a single scan.
pub struct ScanReport<'a> {
    result: &'a ScanResult,
    renderer: Renderer,
}

impl<'a> ScanReport<'a> {
    pub fn new(result: &'a ScanResult, renderer: Renderer) -> Self {
        Self { result, renderer }
    }

    /// Generate report in the specified format.
    pub fn generate(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Table => self.renderer.signals(self.result),
            ReportFormat::Json => self.to_json(),
        }
    }

    /// Generate JSON report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self.result).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screener::engine::ScanOrchestrator;
    use crate::screener::signal::SignalType;
    use test_case::test_case;

    fn signal(symbol: &str, name: &str, strength: u8) -> SignalResult {
        SignalResult {
            symbol: symbol.into(),
            name: name.into(),
            signal_type: SignalType::BuyAfternoon,
            current_price: 9800.0,
            target_price: 9947.0,
            stop_loss: 9405.0,
            potential_gain: 1.5,
            risk_reward: 0.372,
            strength,
            reason: "RSI=25.0 (oversold), Vol=2M (above avg), Gap=0.8%".into(),
        }
    }

    #[test_case(9800.0, "Rp 9800" ; "whole")]
    #[test_case(9946.6, "Rp 9947" ; "rounds")]
    #[test_case(500.0, "Rp 500" ; "small")]
    fn test_format_price(price: f64, expected: &str) {
        assert_eq!(format_price(price), expected);
    }

    #[test_case(999, "999" ; "plain")]
    #[test_case(1_500, "1.5K" ; "thousands")]
    #[test_case(2_340_000, "2.3M" ; "millions")]
    #[test_case(1_200_000_000, "1.2B" ; "billions")]
    fn test_format_volume(volume: u64, expected: &str) {
        assert_eq!(format_volume(volume), expected);
    }

    #[test]
    fn test_stars_width() {
        assert_eq!(stars(3), "***  ");
        assert_eq!(stars(5), "*****");
        assert_eq!(stars(0), "     ");
        assert_eq!(stars(9), "*****");
        for n in 0..=5 {
            assert_eq!(stars(n).len(), 5);
        }
    }

    #[test]
    fn test_report_format_parse() {
        assert_eq!("table".parse::<ReportFormat>().unwrap(), ReportFormat::Table);
        assert_eq!("TEXT".parse::<ReportFormat>().unwrap(), ReportFormat::Table);
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("xml".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_buy_table_row_limit() {
        let signals: Vec<_> = (0..12).map(|i| signal(&format!("S{i:03}"), "Name", 3)).collect();
        let out = Renderer::plain(8).buy_table(&signals);

        assert!(out.contains("S007"));
        assert!(!out.contains("S008"));
        assert_eq!(out.matches("(oversold)").count(), 8);
    }

    #[test]
    fn test_buy_table_truncates_name() {
        let signals = vec![signal("GOTO", "GoTo Gojek Tokopedia Extra Long", 4)];
        let out = Renderer::plain(8).buy_table(&signals);
        assert!(out.contains("GoTo Gojek Tokopedi "));
        assert!(!out.contains("Tokopedia"));
        assert!(out.contains("Rp 9947"));
        assert!(out.contains("1.5%"));
        assert!(out.contains("0.37"));
        assert!(out.contains("****"));
    }

    #[test]
    fn test_empty_tables() {
        let renderer = Renderer::plain(8);
        assert!(renderer.buy_table(&[]).contains("No buy signals"));
        assert!(renderer.sell_table(&[]).contains("No sell signals"));
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let renderer = Renderer::plain(8);
        let out = renderer.buy_table(&[signal("BBCA", "Bank Central Asia", 5)]);
        assert!(!out.contains('\u{1b}'));
        assert!(!renderer.strategy_guide().contains('\u{1b}'));
    }

    #[test]
    fn test_colored_output_has_escape_codes() {
        let out = Renderer::new(true, 8).buy_table(&[signal("BBCA", "Bank Central Asia", 5)]);
        assert!(out.contains('\u{1b}'));
    }

    #[test]
    fn test_stdout_renderer_respects_terminal_detection() {
        console::set_colors_enabled(false);
        let out = Renderer::for_stdout(true, 8).buy_table(&[signal("BBCA", "Bank Central Asia", 5)]);
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_stocks_table() {
        let mut s = MarketSnapshot::new("UNVR", "Unilever Indonesia");
        s.close = 2500.0;
        s.change_percent = -1.25;
        s.volume = 12_345_678;
        s.rsi = 33.3;
        s.afternoon_score = Some(68.0);
        s.morning_score = Some(5.0);

        let out = Renderer::plain(8).stocks_table(&[s]);
        assert!(out.contains("Unilever Indone "));
        assert!(out.contains("Rp 2500"));
        assert!(out.contains("-1.2%") || out.contains("-1.3%"));
        assert!(out.contains("12.3M"));
        assert!(out.contains("68"));
    }

    #[test]
    fn test_json_report_parses_back() {
        let mut s = MarketSnapshot::new("BBCA", "Bank Central Asia");
        s.close = 9800.0;
        s.low = 9500.0;
        s.volatility = 3.0;
        s.afternoon_score = Some(100.0);
        s.morning_score = Some(0.0);
        let result = ScanOrchestrator::default().scan(&[s]);

        let json = ScanReport::new(&result, Renderer::plain(8)).generate(ReportFormat::Json);
        let parsed: ScanResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.buy_signals.len(), 1);
        assert_eq!(parsed.buy_signals[0].symbol, "BBCA");
        assert_eq!(parsed.buy_signals[0].strength, 5);
        assert_eq!(parsed.total_scanned, 1);
    }

    #[test]
    fn test_statistics_view() {
        let result = ScanOrchestrator::default().scan(&[]);
        let stats = ScanStatistics::compute(&[], &result);
        let out = Renderer::plain(8).statistics(&stats, &result);
        assert!(out.contains("Stocks scanned       : 0"));
        assert!(out.contains("Score gate"));
        assert!(out.contains("Buy funnel"));
    }
}
