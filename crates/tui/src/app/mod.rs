use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyEvent};
use view_state::{
    DateWindow, Snapshot, Store, TableView, TransactionsEvent, TransactionsViewState,
    filter::filtered_rows,
};

use crate::{
    client::Client,
    config::AppConfig,
    effects::{Effects, RequestKind, RequestParams},
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    TopupPayment,
    Balance,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::TopupPayment => "Payments",
            Self::Balance => "Balance",
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug)]
pub struct AppState {
    pub section: Section,
    /// View of the table (and of the chart fetched with it).
    pub table_view: TableView,
    /// View of the top-payments chart alone.
    pub chart_view: TableView,
    pub editing_filter: bool,
    pub selected: usize,
    pub loading: Vec<&'static str>,
    pub error: Option<String>,
    pub snapshot: Snapshot,
    pub origin: String,
}

impl AppState {
    /// Number of table rows left after the text filter.
    pub fn visible_rows(&self) -> usize {
        self.snapshot
            .table_data
            .as_ref()
            .map(|table| filtered_rows(table, &self.snapshot.table_data_filter).len())
            .unwrap_or(0)
    }

    fn select_next(&mut self) {
        let rows = self.visible_rows();
        if rows == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(rows - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.visible_rows().saturating_sub(1));
    }
}

pub struct App {
    config: AppConfig,
    store: Store,
    effects: Effects<Client>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let store = Store::new();
        let effects = Effects::new(client, config.origin.clone(), config.top_pay_limit);
        let state = AppState {
            snapshot: store.snapshot(),
            origin: config.origin.clone(),
            ..AppState::default()
        };

        Ok(Self {
            config,
            store,
            effects,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        self.reset_view_state();
        ui::restore_terminal(&mut terminal)?;
        result
    }

    /// Drops outstanding fetches and leaves the store clean.
    fn reset_view_state(&mut self) {
        self.effects.reset();
        self.store.dispatch(TransactionsEvent::Clean);
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        self.request(RequestKind::Transactions)?;
        self.request(RequestKind::TopupPaymentData)?;

        while !self.should_quit {
            self.sync_state();
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key)?;
                }
            }
            // Let spawned fetches make progress between key polls.
            tokio::task::yield_now().await;

            if let Some(message) = self.effects.drain(&mut self.store) {
                self.state.error = Some(message);
            }
        }

        Ok(())
    }

    fn sync_state(&mut self) {
        self.state.snapshot = self.store.snapshot();
        self.state.loading = self.effects.in_flight().map(RequestKind::label).collect();
        self.state.loading.sort_unstable();
        self.state.clamp_selection();
    }

    fn today(&self) -> Result<NaiveDate> {
        self.config.today()
    }

    fn window(&self) -> Result<DateWindow> {
        Ok(self.store.snapshot().time_span.window(self.today()?))
    }

    fn request(&mut self, kind: RequestKind) -> Result<()> {
        let view = match kind {
            RequestKind::TopupPaymentChartFilter => self.state.chart_view,
            _ => self.state.table_view,
        };
        let params = RequestParams {
            view,
            window: self.window()?,
        };
        // The chart arrives with the table, built for the table's view.
        if kind == RequestKind::TopupPaymentData {
            self.state.chart_view = self.state.table_view;
        }
        self.state.error = None;
        self.effects.request(&mut self.store, kind, params);
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = map_key(key);
        if self.state.editing_filter {
            self.handle_filter_key(action);
            return Ok(());
        }

        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::Up => self.state.select_prev(),
            AppAction::Down => self.state.select_next(),
            AppAction::Input(ch) => self.handle_command_key(ch)?,
            AppAction::Cancel | AppAction::Submit | AppAction::Backspace | AppAction::None => {}
        }
        Ok(())
    }

    fn handle_filter_key(&mut self, action: AppAction) {
        let current = self.store.snapshot().table_data_filter.clone();
        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::Submit => self.state.editing_filter = false,
            AppAction::Cancel => {
                self.state.editing_filter = false;
                self.set_filter(String::new());
            }
            AppAction::Backspace => {
                let mut next = current;
                next.pop();
                self.set_filter(next);
            }
            AppAction::Input(ch) => {
                let mut next = current;
                next.push(ch);
                self.set_filter(next);
            }
            AppAction::Up | AppAction::Down | AppAction::None => {}
        }
    }

    fn set_filter(&mut self, filter: String) {
        self.store
            .dispatch(TransactionsEvent::topup_payment_table_filter_changed(filter));
        self.state.selected = 0;
    }

    fn handle_command_key(&mut self, ch: char) -> Result<()> {
        match ch {
            'q' | 'Q' => self.should_quit = true,
            '1' => {
                self.state.section = Section::TopupPayment;
                if self.store.snapshot().table_data.is_none() {
                    self.request(RequestKind::TopupPaymentData)?;
                }
            }
            '2' => {
                self.state.section = Section::Balance;
                if self.store.snapshot().chart_balances_data.is_none() {
                    self.request(RequestKind::BalanceData)?;
                }
            }
            'r' | 'R' => self.refresh()?,
            'v' | 'V' => {
                self.state.table_view = self.state.table_view.next();
                self.state.selected = 0;
                self.request(RequestKind::TopupPaymentData)?;
            }
            'g' | 'G' => {
                self.state.chart_view = self.state.chart_view.next();
                self.request(RequestKind::TopupPaymentChartFilter)?;
            }
            's' | 'S' => {
                let time_span = self.store.snapshot().time_span.next();
                self.store
                    .dispatch(TransactionsEvent::TimeSpanSelected { time_span });
                self.reload_period()?;
            }
            '/' => {
                if self.state.section == Section::TopupPayment {
                    self.state.editing_filter = true;
                }
            }
            'c' | 'C' => self.clean(),
            'j' | 'J' => self.state.select_next(),
            'k' | 'K' => self.state.select_prev(),
            _ => {}
        }
        Ok(())
    }

    /// Refetches what the current section shows.
    fn refresh(&mut self) -> Result<()> {
        self.request(RequestKind::Transactions)?;
        match self.state.section {
            Section::TopupPayment => self.request(RequestKind::TopupPaymentData)?,
            Section::Balance => self.request(RequestKind::BalanceData)?,
        }
        Ok(())
    }

    /// Refetches the current section and every other section already
    /// holding data, so nothing on screen predates the period.
    fn reload_period(&mut self) -> Result<()> {
        let snapshot = self.store.snapshot();
        self.request(RequestKind::Transactions)?;
        if self.state.section == Section::TopupPayment || snapshot.table_data.is_some() {
            self.request(RequestKind::TopupPaymentData)?;
        }
        if self.state.section == Section::Balance || snapshot.chart_balances_data.is_some() {
            self.request(RequestKind::BalanceData)?;
        }
        Ok(())
    }

    fn clean(&mut self) {
        self.reset_view_state();
        self.state.table_view = TableView::All;
        self.state.chart_view = TableView::All;
        self.state.editing_filter = false;
        self.state.selected = 0;
        self.state.error = None;
        tracing::info!("view state cleaned");
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            section: Section::TopupPayment,
            table_view: TableView::All,
            chart_view: TableView::All,
            editing_filter: false,
            selected: 0,
            loading: Vec::new(),
            error: None,
            snapshot: Arc::new(TransactionsViewState::initial()),
            origin: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::transaction::{Transaction, TransactionKind};
    use crossterm::event::{KeyCode, KeyModifiers};
    use view_state::{ChartSeries, TableData, TimeSpan, projection};

    fn state_with_rows(filter: &str) -> AppState {
        let list: Vec<Transaction> = ["Rent", "Salary", "Rent refund"]
            .iter()
            .enumerate()
            .map(|(i, concept)| Transaction {
                id: i as u64,
                date: NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap(),
                kind: TransactionKind::Expense,
                account: "Main".to_string(),
                concept: concept.to_string(),
                amount_minor: 100,
            })
            .collect();
        let mut store = Store::new();
        store.dispatch(TransactionsEvent::topup_payment_data_received(
            "Main",
            projection::table_data(&list, TableView::All, DateWindow::default()),
            projection::top_pay_chart(&list, TableView::All, DateWindow::default(), 8),
        ));
        store.dispatch(TransactionsEvent::topup_payment_table_filter_changed(filter));
        AppState {
            snapshot: store.snapshot(),
            ..AppState::default()
        }
    }

    #[test]
    fn visible_rows_follow_the_filter() {
        assert_eq!(state_with_rows("").visible_rows(), 3);
        assert_eq!(state_with_rows("rent").visible_rows(), 2);
        assert_eq!(state_with_rows("nothing").visible_rows(), 0);
    }

    #[test]
    fn selection_stays_within_visible_rows() {
        let mut state = state_with_rows("rent");
        for _ in 0..5 {
            state.select_next();
        }
        assert_eq!(state.selected, 1);
        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected, 0);

        let mut state = state_with_rows("");
        state.selected = 10;
        state.clamp_selection();
        assert_eq!(state.selected, 2);
    }

    fn test_app() -> App {
        let config = AppConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..AppConfig::default()
        };
        App::new(config).unwrap()
    }

    fn key(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn press(app: &mut App, keys: &str) {
        for ch in keys.chars() {
            key(app, KeyCode::Char(ch));
        }
    }

    fn in_flight(app: &App) -> Vec<RequestKind> {
        let mut kinds: Vec<_> = app.effects.in_flight().collect();
        kinds.sort_by_key(|kind| kind.label());
        kinds
    }

    #[tokio::test]
    async fn filter_keystrokes_update_the_store() {
        let mut app = test_app();
        press(&mut app, "/re");
        assert!(app.state.editing_filter);
        assert_eq!(app.store.snapshot().table_data_filter, "re");

        key(&mut app, KeyCode::Backspace);
        assert_eq!(app.store.snapshot().table_data_filter, "r");

        press(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.store.snapshot().table_data_filter, "rq");

        key(&mut app, KeyCode::Esc);
        assert!(!app.state.editing_filter);
        assert_eq!(app.store.snapshot().table_data_filter, "");
    }

    #[tokio::test]
    async fn enter_keeps_the_filter() {
        let mut app = test_app();
        press(&mut app, "/cafe");
        key(&mut app, KeyCode::Enter);
        assert!(!app.state.editing_filter);
        assert_eq!(app.store.snapshot().table_data_filter, "cafe");

        press(&mut app, "q");
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn period_change_refetches_every_loaded_section() {
        let mut app = test_app();
        app.store.dispatch(TransactionsEvent::balance_data_received(
            "Main",
            ChartSeries::default(),
        ));

        press(&mut app, "s");
        assert_eq!(app.store.snapshot().time_span, TimeSpan::Last90Days);
        assert_eq!(
            in_flight(&app),
            vec![
                RequestKind::BalanceData,
                RequestKind::TopupPaymentData,
                RequestKind::Transactions,
            ]
        );
    }

    #[tokio::test]
    async fn period_change_on_balance_refetches_loaded_table() {
        let mut app = test_app();
        app.state.section = Section::Balance;
        app.store.dispatch(TransactionsEvent::topup_payment_data_received(
            "Main",
            TableData::default(),
            ChartSeries::default(),
        ));

        press(&mut app, "s");
        assert!(in_flight(&app).contains(&RequestKind::TopupPaymentData));
        assert!(in_flight(&app).contains(&RequestKind::BalanceData));
    }

    #[tokio::test]
    async fn period_change_skips_sections_never_loaded() {
        let mut app = test_app();
        press(&mut app, "s");
        assert_eq!(
            in_flight(&app),
            vec![RequestKind::TopupPaymentData, RequestKind::Transactions]
        );
    }

    #[tokio::test]
    async fn section_keys_request_only_missing_data() {
        let mut app = test_app();
        press(&mut app, "2");
        assert_eq!(app.state.section, Section::Balance);
        assert_eq!(in_flight(&app), vec![RequestKind::BalanceData]);

        let mut app = test_app();
        app.store.dispatch(TransactionsEvent::topup_payment_data_received(
            "Main",
            TableData::default(),
            ChartSeries::default(),
        ));
        press(&mut app, "21");
        assert_eq!(app.state.section, Section::TopupPayment);
        assert_eq!(in_flight(&app), vec![RequestKind::BalanceData]);
    }

    #[tokio::test]
    async fn table_view_change_realigns_chart_view() {
        let mut app = test_app();
        press(&mut app, "g");
        assert_eq!(app.state.chart_view, TableView::Income);
        assert_eq!(app.state.table_view, TableView::All);

        press(&mut app, "v");
        assert_eq!(app.state.table_view, TableView::Income);
        assert_eq!(app.state.chart_view, TableView::Income);
        assert_eq!(in_flight(&app), vec![RequestKind::TopupPaymentData]);
    }

    #[tokio::test]
    async fn clean_resets_store_and_cancels_requests() {
        let mut app = test_app();
        press(&mut app, "/x");
        key(&mut app, KeyCode::Enter);
        press(&mut app, "vr");
        assert!(!in_flight(&app).is_empty());

        press(&mut app, "c");
        assert_eq!(*app.store.snapshot(), TransactionsViewState::initial());
        assert!(in_flight(&app).is_empty());
        assert_eq!(app.state.table_view, TableView::All);
    }

    #[tokio::test]
    async fn reset_view_state_cancels_requests_in_flight() {
        let mut app = test_app();
        app.store.dispatch(TransactionsEvent::transactions_received(Vec::new()));
        press(&mut app, "r");
        assert!(!in_flight(&app).is_empty());

        app.reset_view_state();
        assert!(in_flight(&app).is_empty());
        assert_eq!(*app.store.snapshot(), TransactionsViewState::initial());
    }
}
