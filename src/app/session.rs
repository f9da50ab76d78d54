use crate::core::engine::{paginate, DiscoveryEngine, Page};
use crate::core::query_codec;
use crate::core::{FilterState, ListingType, Notifier, Property, PropertyTypeFilter, SortOrder};
use std::sync::Arc;

/// Notifier that writes result summaries to the log.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// One user's search: the facet state, the ordered results and the page being
/// viewed. Every facet setter recomputes the results before returning.
pub struct SearchSession {
    engine: DiscoveryEngine,
    notifier: Arc<dyn Notifier>,
    filter: FilterState,
    results: Vec<usize>,
    page: usize,
    page_size: usize,
    query: String,
}

impl SearchSession {
    pub fn new(engine: DiscoveryEngine, page_size: usize, notifier: Arc<dyn Notifier>) -> Self {
        Self::from_query(engine, "", page_size, notifier)
    }

    /// Seeds the facets from a query string. The stored query is kept verbatim
    /// until the next [`SearchSession::apply`].
    pub fn from_query(
        engine: DiscoveryEngine,
        query: &str,
        page_size: usize,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let filter = query_codec::decode_state(query);
        let mut session = Self {
            engine,
            notifier,
            filter,
            results: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            query: query.strip_prefix('?').unwrap_or(query).to_string(),
        };
        session.recompute();
        session
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn count(&self) -> usize {
        self.results.len()
    }

    pub fn results(&self) -> Vec<&Property> {
        let inventory = self.engine.inventory();
        self.results
            .iter()
            .filter_map(|&i| inventory.get(i))
            .collect()
    }

    pub fn current_page(&self) -> Page<'_> {
        paginate(&self.results(), self.page, self.page_size)
    }

    pub fn set_listing_type(&mut self, listing_type: ListingType) {
        self.filter.set_listing_type(listing_type);
        self.recompute();
    }

    pub fn set_property_type(&mut self, property_type: PropertyTypeFilter) {
        self.filter.set_property_type(property_type);
        self.recompute();
    }

    pub fn set_price_range(&mut self, min: u64, max: u64) {
        self.filter.set_price_range(min, max);
        self.recompute();
    }

    pub fn set_area_range(&mut self, min: u64, max: u64) {
        self.filter.set_area_range(min, max);
        self.recompute();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.set_search_term(term);
        self.recompute();
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.filter.set_sort_order(sort_order);
        self.recompute();
    }

    pub fn reset(&mut self) {
        self.filter.reset();
        self.recompute();
    }

    /// Moves to another page of the current results without re-running the search.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.page = self.current_page().number;
    }

    /// Writes the current facets into the query string and returns it.
    pub fn apply(&mut self) -> &str {
        self.query = query_codec::encode(&self.filter);
        tracing::debug!("Applied filters to query '{}'", self.query);
        &self.query
    }

    fn recompute(&mut self) {
        self.results = self.engine.rank(&self.filter);
        self.page = 1;

        let count = self.results.len();
        tracing::debug!(
            "Recomputed search: {} of {} properties",
            count,
            self.engine.inventory().len()
        );
        let noun = if count == 1 { "property" } else { "properties" };
        self.notifier.notify(&format!("{} {} found", count, noun));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Inventory, PropertyType};
    use crate::domain::model::PriceUnit;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn last(&self) -> Option<String> {
            self.messages.lock().unwrap().last().cloned()
        }

        fn len(&self) -> usize {
            self.messages.lock().unwrap().len()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    fn listing(id: &str, title: &str, price: u64, unit: PriceUnit, kind: PropertyType) -> Property {
        Property {
            id: id.to_string(),
            title: title.to_string(),
            price,
            price_unit: unit,
            location: "Miami, FL".to_string(),
            property_type: kind,
            beds: None,
            baths: None,
            area: None,
            image_url: String::new(),
            coordinates: None,
        }
    }

    fn engine() -> DiscoveryEngine {
        DiscoveryEngine::new(
            Inventory::new(vec![
                listing("1", "Luxury Villa", 1_250_000, PriceUnit::Sale, PropertyType::House),
                listing("2", "Downtown Apartment", 5_500, PriceUnit::Rent, PropertyType::Apartment),
                listing("3", "Land Plot", 850_000, PriceUnit::Sale, PropertyType::Land),
                listing("6", "Beachfront Condo", 3_200, PriceUnit::Rent, PropertyType::Apartment),
            ])
            .unwrap(),
        )
    }

    fn ids(session: &SearchSession) -> Vec<String> {
        session.results().iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_query_seeds_facets_and_notifies() {
        let notifier = Arc::new(RecordingNotifier::default());
        let session = SearchSession::from_query(engine(), "?type=rent", 6, notifier.clone());

        assert_eq!(session.filter().listing_type(), ListingType::Rent);
        assert_eq!(ids(&session), vec!["6", "2"]);
        assert_eq!(session.query(), "type=rent");
        assert_eq!(notifier.last().as_deref(), Some("2 properties found"));
    }

    #[test]
    fn test_each_setter_recomputes() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut session = SearchSession::new(engine(), 6, notifier.clone());
        assert_eq!(session.count(), 4);

        session.set_property_type(PropertyType::Land.into());
        assert_eq!(ids(&session), vec!["3"]);
        assert_eq!(notifier.last().as_deref(), Some("1 property found"));

        session.reset();
        session.set_sort_order(SortOrder::PriceDesc);
        assert_eq!(ids(&session), vec!["1", "3", "2", "6"]);

        session.set_search_term("condo");
        assert_eq!(ids(&session), vec!["6"]);

        session.set_search_term("");
        session.set_price_range(900_000, 1_000);
        assert_eq!(ids(&session), vec!["3", "2", "6"]);

        assert_eq!(notifier.len(), 7);
    }

    #[test]
    fn test_apply_encodes_instead_of_clearing() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut session = SearchSession::from_query(engine(), "", 6, notifier);
        session.set_listing_type(ListingType::Sale);
        session.set_search_term("Villa");

        let query = session.apply().to_string();
        assert_eq!(query, "type=buy&location=Villa");
        assert_eq!(session.query(), query);

        let restored =
            SearchSession::from_query(engine(), &query, 6, Arc::new(TracingNotifier));
        assert_eq!(restored.filter(), session.filter());
    }

    #[test]
    fn test_paging_through_results() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut session = SearchSession::new(engine(), 3, notifier.clone());

        assert_eq!(session.current_page().total_pages, 2);
        session.set_page(2);
        let page = session.current_page();
        assert_eq!(page.number, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(notifier.len(), 1);

        session.set_page(10);
        assert_eq!(session.current_page().number, 2);

        session.set_listing_type(ListingType::Rent);
        assert_eq!(session.current_page().number, 1);
    }
}
