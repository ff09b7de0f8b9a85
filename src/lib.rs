//! crafting-graph: item catalog and crafting relation viewer for a game wiki.
//!
//! The core ([`graph::build`] and [`graph::position`]) turns one focal item and the
//! catalog into a two-column graph description. The [`App`] component loads the dataset
//! embedded in the page and renders that description on a canvas.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, UrlSearchParams};

pub mod catalog;
pub mod components;
pub mod error;
pub mod graph;
pub mod i18n;

pub use catalog::query::{ItemQuery, SortField};
pub use catalog::verify::{VerifyReport, verify};
pub use catalog::{Catalog, Direction, Item, Rarity, RelationKind};
pub use components::crafting_graph::{
	CraftingGraph, CraftingGraphCanvas, NodeSelection, ScaleConfig, Theme,
};
pub use error::{Error, Result};
pub use graph::{
	GraphEdge, GraphElements, GraphNode, GroupCluster, LayoutConfig, LayoutError,
	LayoutPositions, NodeId, NodeRole, Point, Side, build, position,
};
pub use i18n::Translations;

/// Focal item when the URL names none.
pub const DEFAULT_ITEM: &str = "Power Rod";

/// Number of search suggestions shown at once.
const SEARCH_LIMIT: usize = 8;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("crafting-graph: logging initialized");
}

/// Text of the `<script>` element with the given id.
fn load_script_json(id: &'static str) -> Result<String> {
	web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(id))
		.and_then(|e| e.dyn_into::<HtmlScriptElement>().ok())
		.and_then(|s| s.text().ok())
		.ok_or(Error::MissingDataElement(id))
}

/// Loads the item dataset from `<script id="items-data">`.
fn load_catalog() -> Result<Catalog> {
	let catalog = Catalog::from_json(&load_script_json("items-data")?)?;
	info!("crafting-graph: loaded {} items", catalog.len());
	Ok(catalog)
}

/// Loads `<script id="i18n-data">` if present, English otherwise.
fn load_translations() -> Translations {
	match load_script_json("i18n-data").and_then(|json| Translations::from_json(&json)) {
		Ok(translations) => {
			info!("crafting-graph: locale {}", translations.locale);
			translations
		}
		Err(Error::MissingDataElement(_)) => Translations::english(),
		Err(e) => {
			warn!("crafting-graph: {e}, falling back to English");
			Translations::english()
		}
	}
}

/// Logs the dataset consistency report. Gaps are tolerated by the viewer.
fn report_dataset(catalog: &Catalog) {
	let report = verify(catalog);
	info!(
		"crafting-graph: {} items, {} relations, {} items without relations",
		report.total_nodes,
		report.total_edges,
		report.nodes_without_edges()
	);
	if report.passed() {
		return;
	}
	warn!(
		"crafting-graph: dataset check found {} incomplete records and {} edge issues",
		report.missing_fields.len(),
		report.edge_issues.len()
	);
	for missing in report.missing_fields.iter().take(5) {
		warn!("crafting-graph: {} is missing {}", missing.node, missing.fields.join(", "));
	}
	for issue in report.edge_issues.iter().take(5) {
		warn!("crafting-graph: {issue}");
	}
}

/// Page selected by the query string.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Route {
	/// `?view=items`: the searchable item grid.
	Items,
	/// `?item=<name>`, or no query at all: the graph around one item.
	Graph(String),
}

impl Route {
	/// `item` wins over `view`; a blank `item` counts as absent.
	fn from_query(view: Option<&str>, item: Option<&str>) -> Self {
		match (view, item.filter(|name| !name.trim().is_empty())) {
			(_, Some(name)) => Route::Graph(name.to_string()),
			(Some("items"), None) => Route::Items,
			_ => Route::Graph(DEFAULT_ITEM.to_string()),
		}
	}
}

fn route_from_url() -> Route {
	let params = web_sys::window()
		.and_then(|w| w.location().search().ok())
		.and_then(|search| UrlSearchParams::new_with_str(&search).ok());
	match params {
		Some(params) => {
			Route::from_query(params.get("view").as_deref(), params.get("item").as_deref())
		}
		None => Route::from_query(None, None),
	}
}

fn item_href(name: &str) -> String {
	format!("?item={}", String::from(js_sys::encode_uri_component(name)))
}

fn proxy_image_url(url: &str) -> String {
	format!(
		"/api/proxy-image?url={}",
		String::from(js_sys::encode_uri_component(url))
	)
}

fn navigate_to(name: &str) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Err(e) = window.location().set_href(&item_href(name)) {
		warn!("crafting-graph: navigation to {name} failed: {e:?}");
	}
}

fn value_text(value: &serde_json::Value) -> String {
	match value {
		serde_json::Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Main application component.
/// Loads the dataset from the DOM and renders the item grid or the graph around the
/// focal item, depending on the URL.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let translations = load_translations();
	let lang = translations.locale.clone();
	let route = route_from_url();
	let title = match &route {
		Route::Items => translations.t("nav.items").to_string(),
		Route::Graph(name) => format!("{} - Crafting Graph", translations.item_name(name)),
	};
	let nav = view! { <NavBar translations=translations.clone() /> };

	let body = match load_catalog() {
		Ok(catalog) => {
			report_dataset(&catalog);
			match route {
				Route::Items => {
					view! { <ItemGrid catalog=Arc::new(catalog) translations=translations /> }.into_any()
				}
				Route::Graph(focal) => graph_page(catalog, focal, translations),
			}
		}
		Err(e) => {
			error!("crafting-graph: {e}");
			view! { <div class="graph-error"><p>{e.to_string()}</p></div> }.into_any()
		}
	};

	view! {
		<Html attr:lang=lang attr:dir="ltr" attr:data-theme="dark" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		{nav}
		{body}
	}
}

/// Graph page for `focal`, or the not-found / layout-error state.
fn graph_page(catalog: Catalog, focal: String, translations: Translations) -> AnyView {
	match CraftingGraph::for_item(&catalog, &focal, &LayoutConfig::default()) {
		Ok(Some(graph)) => view! {
			<GraphView graph=graph catalog=Arc::new(catalog) translations=translations />
		}
		.into_any(),
		Ok(None) => {
			warn!("crafting-graph: unknown item {focal:?}");
			view! { <NotFound name=focal translations=translations /> }.into_any()
		}
		Err(e) => {
			error!("crafting-graph: {focal}: {e}");
			let message = translations.t("graph.layoutError").to_string();
			view! { <div class="graph-error"><p>{message}</p></div> }.into_any()
		}
	}
}

/// Links between the item grid and the graph.
#[component]
fn NavBar(translations: Translations) -> impl IntoView {
	let items = translations.t("nav.items").to_string();
	let graph = translations.t("nav.graph").to_string();

	view! {
		<nav class="site-nav">
			<a href="?view=items">{items}</a>
			<a href=item_href(DEFAULT_ITEM)>{graph}</a>
		</nav>
	}
}

/// One grid card, linking to the item's graph.
fn item_card(item: &Item, translations: &Translations, theme: &Theme) -> impl IntoView + use<> {
	let color = theme.rarity_color(item.rarity()).to_css();
	let card_style = format!("border-color: {color}");
	let name_style = format!("color: {color}");
	let label = translations.item_name(&item.name).to_string();
	let image = match item.thumb() {
		Some(url) => view! { <img src=url.to_string() alt=label.clone() /> }.into_any(),
		None => view! { <span class="item-card-placeholder">"?"</span> }.into_any(),
	};

	view! {
		<a class="item-card" href=item_href(&item.name) style=card_style>
			<div class="item-card-image">{image}</div>
			<h3 style=name_style>{label}</h3>
		</a>
	}
}

/// Catalog browser: search, sort, type filter, result count and the card grid.
#[component]
fn ItemGrid(catalog: Arc<Catalog>, translations: Translations) -> impl IntoView {
	let query = RwSignal::new(ItemQuery::for_catalog(&catalog));
	let all_types = catalog.item_types();
	let theme = Theme::default();
	let t = |key: &str| translations.t(key).to_string();

	let results_catalog = catalog.clone();
	let results = Memo::new(move |_| {
		query.with(|q| {
			q.run(&results_catalog)
				.into_iter()
				.map(|item| item.name.clone())
				.collect::<Vec<_>>()
		})
	});

	let sort_buttons = SortField::ALL
		.into_iter()
		.map(|field| {
			let label = t(field.label_key());
			view! {
				<button
					class="sort-button"
					class:active=move || query.with(|q| q.sort == field)
					on:click=move |_| query.update(|q| q.sort = field)
				>
					{label}
				</button>
			}
		})
		.collect_view();

	let (ascending, descending) = (t("grid.ascending"), t("grid.descending"));
	let direction = move || {
		if query.with(|q| q.ascending) {
			ascending.clone()
		} else {
			descending.clone()
		}
	};

	let (found_one, found_many) = (t("grid.itemFound"), t("grid.itemsFound"));
	let count_label = move || {
		if results.with(Vec::len) == 1 {
			found_one.clone()
		} else {
			found_many.clone()
		}
	};

	let type_buttons = all_types
		.into_iter()
		.map(|item_type| {
			let (active_type, toggled_type) = (item_type.clone(), item_type.clone());
			view! {
				<button
					class="type-toggle"
					class:active=move || query.with(|q| q.has_type(&active_type))
					on:click=move |_| query.update(|q| q.toggle_type(&toggled_type))
				>
					{item_type}
				</button>
			}
		})
		.collect_view();

	let select_catalog = catalog.clone();
	let (card_catalog, card_translations) = (catalog.clone(), translations.clone());
	let cards = move || {
		results
			.get()
			.into_iter()
			.filter_map(|name| card_catalog.get(&name).map(|item| item_card(item, &card_translations, &theme)))
			.collect_view()
	};

	let (no_results, no_results_hint) = (t("grid.noResults"), t("grid.noResultsHint"));
	let empty = move || {
		results.with(Vec::is_empty).then(|| {
			view! {
				<div class="grid-empty">
					<h3>{no_results.clone()}</h3>
					<p>{no_results_hint.clone()}</p>
				</div>
			}
		})
	};

	view! {
		<div class="item-database">
			<aside class="grid-sidebar">
				<h3>{t("grid.search")}</h3>
				<input
					type="search"
					placeholder=t("grid.search")
					prop:value=move || query.with(|q| q.search.clone())
					on:input=move |ev| query.update(|q| q.search = event_target_value(&ev))
				/>
				<h3>{t("grid.sortBy")}</h3>
				<div class="sort-buttons">{sort_buttons}</div>
				<button class="sort-direction" on:click=move |_| query.update(|q| q.ascending = !q.ascending)>
					{direction}
				</button>
				<div class="result-count">
					<strong>{move || results.with(Vec::len)}</strong>
					" "
					{count_label}
				</div>
				<h3>{t("grid.filterByType")}</h3>
				<button on:click=move |_| query.update(|q| q.select_all_types(&select_catalog))>
					{t("grid.selectAll")}
				</button>
				<button on:click=move |_| query.update(ItemQuery::clear_types)>{t("grid.clearAll")}</button>
				<div class="type-toggles">{type_buttons}</div>
			</aside>
			<main class="item-grid">
				{cards}
				{empty}
			</main>
		</div>
	}
}

/// Canvas plus overlay: title, help, legend, search and the detail panel.
#[component]
fn GraphView(graph: CraftingGraph, catalog: Arc<Catalog>, translations: Translations) -> impl IntoView {
	let heading = graph
		.elements
		.center()
		.map(|c| translations.item_name(&c.label).to_string())
		.unwrap_or_default();
	let help = translations.t("help.clickNodesToNavigate").to_string();
	let graph_signal = Signal::derive(move || graph.clone());

	let selected = RwSignal::new(None::<String>);
	let on_select = Callback::new(move |selection: NodeSelection| {
		if selection.is_center {
			selected.set(Some(selection.item_name));
		} else {
			navigate_to(&selection.item_name);
		}
	});
	let on_close = Callback::new(move |_: ()| selected.set(None));

	let (panel_catalog, panel_translations) = (catalog.clone(), translations.clone());
	let panel = move || {
		let item = selected.get().and_then(|name| panel_catalog.get(&name).cloned())?;
		Some(view! {
			<ItemDetailPanel item=item translations=panel_translations.clone() on_close=on_close />
		})
	};

	view! {
		<div class="fullscreen-graph">
			<CraftingGraphCanvas
				data=graph_signal
				translations=translations.clone()
				on_select=on_select
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>{heading}</h1>
				<p class="subtitle">{help}</p>
				<Legend translations=translations.clone() />
				<SearchBox catalog=catalog translations=translations />
			</div>
			{panel}
		</div>
	}
}

/// Relation colors, in priority order.
#[component]
fn Legend(translations: Translations) -> impl IntoView {
	let theme = Theme::default();
	let heading = translations.t("graph.legend").to_string();
	let entries = RelationKind::ALL
		.into_iter()
		.map(|kind| {
			let style = format!("background-color: {}", theme.kind_color(kind).to_css());
			let label = translations.t(kind.label_key()).to_string();
			view! {
				<li>
					<span class="legend-swatch" style=style></span>
					{label}
				</li>
			}
		})
		.collect_view();

	view! {
		<div class="graph-legend">
			<h2>{heading}</h2>
			<ul>{entries}</ul>
		</div>
	}
}

/// Text box suggesting other focal items.
#[component]
fn SearchBox(catalog: Arc<Catalog>, translations: Translations) -> impl IntoView {
	let (query, set_query) = signal(String::new());
	let placeholder = translations.t("graph.search").to_string();

	let results = move || {
		let text = query.get();
		if text.trim().is_empty() {
			return Vec::new();
		}
		ItemQuery::search(text)
			.run(&catalog)
			.into_iter()
			.take(SEARCH_LIMIT)
			.map(|item| {
				let label = translations.item_name(&item.name).to_string();
				view! {
					<li><a href=item_href(&item.name)>{label}</a></li>
				}
			})
			.collect::<Vec<_>>()
	};

	view! {
		<div class="graph-search">
			<input
				type="search"
				placeholder=placeholder
				prop:value=query
				on:input=move |ev| set_query.set(event_target_value(&ev))
			/>
			<ul class="search-results">{results}</ul>
		</div>
	}
}

/// Infobox details of the focal item.
#[component]
fn ItemDetailPanel(item: Item, translations: Translations, on_close: Callback<()>) -> impl IntoView {
	let infobox = item.infobox.clone().unwrap_or_default();
	let name = translations.item_name(&item.name).to_string();
	let rarity_style = format!(
		"color: {}",
		Theme::default().rarity_color(item.rarity()).to_css()
	);
	let rarity = item.rarity().map(|r| r.to_string());

	let mut rows = vec![
		(
			translations.t("item.type").to_string(),
			infobox.item_type.clone().unwrap_or_else(|| "N/A".into()),
		),
		(
			translations.t("item.sellPrice").to_string(),
			catalog::SellPrice::display(infobox.sellprice.as_ref()),
		),
	];
	if let Some(weight) = infobox.weight {
		rows.push((translations.t("item.weight").to_string(), weight.to_string()));
	}
	if let Some(stack) = &infobox.stacksize {
		rows.push((translations.t("item.stackSize").to_string(), value_text(stack)));
	}
	if let Some(damage) = &infobox.damage {
		rows.push((translations.t("item.damage").to_string(), value_text(damage)));
	}
	let rows = rows
		.into_iter()
		.map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
		.collect_view();

	let thumb = item.thumb().map(|url| {
		view! { <img class="item-thumb" src=proxy_image_url(url) alt=name.clone() /> }
	});
	let sources = (!item.sources.is_empty()).then(|| {
		let heading = translations.t("item.sources").to_string();
		let list = item
			.sources
			.iter()
			.map(|s| view! { <li>{s.clone()}</li> })
			.collect_view();
		view! { <h3>{heading}</h3><ul class="item-sources">{list}</ul> }
	});
	let wiki = item.wiki_url.clone().map(|url| {
		let label = translations.t("item.wiki").to_string();
		view! { <a class="item-wiki" href=url target="_blank" rel="noopener noreferrer">{label}</a> }
	});
	let quote = infobox.quote.clone().map(|q| view! { <blockquote>{q}</blockquote> });
	let close = translations.t("buttons.close").to_string();

	view! {
		<aside class="item-detail">
			<button class="item-detail-close" on:click=move |_| on_close.run(())>{close}</button>
			{thumb}
			<h2>{name}</h2>
			<p class="item-rarity" style=rarity_style>{rarity}</p>
			{quote}
			<dl>{rows}</dl>
			{sources}
			{wiki}
		</aside>
	}
}

/// Shown when `?item=` names an item the catalog lacks.
#[component]
fn NotFound(name: String, translations: Translations) -> impl IntoView {
	let heading = translations.t("graph.notFound").to_string();
	let detail = format!("\"{name}\" {}", translations.t("graph.notFoundDetail"));
	let back = format!(
		"{} {}",
		translations.t("graph.goTo"),
		translations.item_name(DEFAULT_ITEM)
	);

	view! {
		<div class="not-found">
			<h1>{heading}</h1>
			<p>{detail}</p>
			<a href=item_href(DEFAULT_ITEM)>{back}</a>
		</div>
	}
}
