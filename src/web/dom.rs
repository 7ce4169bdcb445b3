use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlButtonElement, HtmlElement, HtmlSelectElement};

use crate::error::Error;
use crate::surface::{
    parse_move, Control, Region, Selector, Surface, Table, HUMAN_BUTTON_SELECTOR, HUMAN_ROW_ID,
    MOVE_ATTRIBUTE,
};
use crate::ui_model::{self, ACTIVE_CLASS, TAB_BUTTON_SELECTOR, TAB_PANEL_SELECTOR};

/// [`Surface`] over the live page. Elements are looked up once at bind time.
pub(super) struct DomSurface {
    document: Document,
    board: Element,
    message: Element,
    red_thoughts: Element,
    blue_thoughts: Element,
    move_btn: HtmlButtonElement,
    run_btn: HtmlButtonElement,
    reset_btn: HtmlButtonElement,
    red_model: HtmlSelectElement,
    blue_model: HtmlSelectElement,
    variant: HtmlSelectElement,
    human_row: HtmlElement,
    human_buttons: Vec<HtmlElement>,
    tab_buttons: Vec<HtmlElement>,
    tab_panels: Vec<HtmlElement>,
    ratings: Element,
    results: Element,
}

impl DomSurface {
    pub(super) fn bind(document: &Document) -> Result<Self, Error> {
        Ok(Self {
            document: document.clone(),
            board: by_id(document, Region::Board.element_id())?,
            message: by_id(document, Region::Message.element_id())?,
            red_thoughts: by_id(document, Region::RedThoughts.element_id())?,
            blue_thoughts: by_id(document, Region::BlueThoughts.element_id())?,
            move_btn: by_id(document, Control::Move.element_id())?,
            run_btn: by_id(document, Control::Run.element_id())?,
            reset_btn: by_id(document, Control::Reset.element_id())?,
            red_model: by_id(document, Selector::RedModel.element_id())?,
            blue_model: by_id(document, Selector::BlueModel.element_id())?,
            variant: by_id(document, Selector::Variant.element_id())?,
            human_row: by_id(document, HUMAN_ROW_ID)?,
            human_buttons: all_matching(document, HUMAN_BUTTON_SELECTOR)?,
            tab_buttons: all_matching(document, TAB_BUTTON_SELECTOR)?,
            tab_panels: all_matching(document, TAB_PANEL_SELECTOR)?,
            ratings: by_id(document, Table::Ratings.element_id())?,
            results: by_id(document, Table::Results.element_id())?,
        })
    }

    pub(super) fn target(&self, control: Control) -> &EventTarget {
        match control {
            Control::Move => &self.move_btn,
            Control::Run => &self.run_btn,
            Control::Reset => &self.reset_btn,
            Control::RedModel => &self.red_model,
            Control::BlueModel => &self.blue_model,
            Control::Variant => &self.variant,
        }
    }

    pub(super) fn human_buttons(&self) -> &[HtmlElement] {
        &self.human_buttons
    }

    pub(super) fn tab_buttons(&self) -> &[HtmlElement] {
        &self.tab_buttons
    }

    fn region(&self, region: Region) -> &Element {
        match region {
            Region::Board => &self.board,
            Region::Message => &self.message,
            Region::RedThoughts => &self.red_thoughts,
            Region::BlueThoughts => &self.blue_thoughts,
        }
    }

    fn select(&self, selector: Selector) -> &HtmlSelectElement {
        match selector {
            Selector::RedModel => &self.red_model,
            Selector::BlueModel => &self.blue_model,
            Selector::Variant => &self.variant,
        }
    }

    fn table(&self, table: Table) -> &Element {
        match table {
            Table::Ratings => &self.ratings,
            Table::Results => &self.results,
        }
    }

    fn build_row(&self, cells: &[String]) -> Result<Element, JsValue> {
        let tr = self.document.create_element("tr")?;
        for cell in cells {
            let td = self.document.create_element("td")?;
            td.set_text_content(Some(cell.as_str()));
            tr.append_child(&td)?;
        }
        Ok(tr)
    }
}

impl Surface for DomSurface {
    fn set_html(&self, region: Region, html: &str) {
        self.region(region).set_inner_html(html);
    }

    fn set_disabled(&self, control: Control, disabled: bool) {
        match control {
            Control::Move => self.move_btn.set_disabled(disabled),
            Control::Run => self.run_btn.set_disabled(disabled),
            Control::Reset => self.reset_btn.set_disabled(disabled),
            Control::RedModel => self.red_model.set_disabled(disabled),
            Control::BlueModel => self.blue_model.set_disabled(disabled),
            Control::Variant => self.variant.set_disabled(disabled),
        }
    }

    fn set_human_row_hidden(&self, hidden: bool) {
        self.human_row.set_hidden(hidden);
    }

    fn human_moves(&self) -> Vec<Option<u32>> {
        self.human_buttons
            .iter()
            .map(|b| b.get_attribute(MOVE_ATTRIBUTE).as_deref().and_then(parse_move))
            .collect()
    }

    fn set_human_move_hidden(&self, index: usize, hidden: bool) {
        if let Some(button) = self.human_buttons.get(index) {
            button.set_hidden(hidden);
        }
    }

    fn selection(&self, selector: Selector) -> String {
        self.select(selector).value()
    }

    fn set_selection(&self, selector: Selector, value: &str) {
        self.select(selector).set_value(value);
    }

    fn replace_rows(&self, table: Table, rows: &[Vec<String>]) {
        // Rows are built detached so a failure leaves the previous table in place.
        let built: Result<Vec<Element>, JsValue> =
            rows.iter().map(|cells| self.build_row(cells)).collect();
        let built = match built {
            Ok(built) => built,
            Err(e) => {
                tracing::warn!(?table, error = ?e, "failed to build leaderboard rows");
                return;
            }
        };
        let body = self.table(table);
        body.set_inner_html("");
        for tr in &built {
            if let Err(e) = body.append_child(tr) {
                tracing::warn!(?table, error = ?e, "failed to attach leaderboard row");
                return;
            }
        }
    }

    fn activate_tab(&self, tab: &str) {
        let panel = ui_model::panel_id(tab);
        for button in &self.tab_buttons {
            let on = button.get_attribute(ui_model::TAB_ATTRIBUTE).as_deref() == Some(tab);
            mark_active(button, on);
        }
        for p in &self.tab_panels {
            mark_active(p, p.id() == panel);
        }
    }
}

fn mark_active(element: &Element, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(ACTIVE_CLASS, on) {
        tracing::debug!(id = %element.id(), error = ?e, "active class not toggled");
    }
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, Error> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| Error::Page(format!("#{id}")))
}

fn all_matching(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, Error> {
    let list = document
        .query_selector_all(selector)
        .map_err(|_| Error::Page(selector.to_string()))?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}
