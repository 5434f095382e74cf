use tabledom::{Document, Element, Event, EventResult, parse_fragment, render_element};
use tablesort_lib::{Direction, Glyphs, SortError, SorterConfig, TableSorter};

/// Build a table `t` with the given header labels and rows of cell text.
fn table_doc(headers: &[&str], rows: &[&[&str]]) -> Document {
    let header_row = Element::tr().children(
        headers
            .iter()
            .enumerate()
            .map(|(i, h)| Element::th(*h).id(format!("h{i}"))),
    );
    let body = Element::tbody().id("body").children(rows.iter().map(|cells| {
        Element::tr().children(cells.iter().map(|c| Element::td(*c)))
    }));
    let table = Element::table()
        .id("t")
        .child(Element::thead().child(header_row))
        .child(body);
    Document::new(Element::new("div").id("page").child(table))
}

fn single_column(values: &[&str]) -> Document {
    let rows: Vec<[&str; 1]> = values.iter().map(|v| [*v]).collect();
    let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
    table_doc(&["Value"], &rows)
}

/// Text of column `col` for every body row, in order.
fn column(doc: &Document, col: usize) -> Vec<String> {
    doc.query_all("body", "tr")
        .iter()
        .map(|row| {
            let cells = doc.query_all(row, "td");
            doc.text_content(&cells[col]).unwrap()
        })
        .collect()
}

fn icon_text(doc: &Document, header: &str) -> String {
    let icon = doc.query_class(header, "sort-icon").unwrap();
    doc.text_content(&icon).unwrap()
}

fn click(doc: &mut Document, sorter: &mut TableSorter, target: &str) {
    let result = doc.dispatch(&Event::click(target), sorter).unwrap();
    assert_eq!(result, EventResult::Consumed);
}

// ============================================================================
// Initialization
// ============================================================================

#[test]
fn test_init_decorates_headers() {
    let mut doc = table_doc(&["Part", "Qty"], &[&["R1", "10"]]);
    let sorter = TableSorter::init(&mut doc);

    assert_eq!(sorter.tables().len(), 1);
    assert_eq!(sorter.column_count("t"), Some(2));
    assert_eq!(sorter.header_id("t", 1), Some("h1"));

    let header = doc.find("h0").unwrap();
    assert_eq!(header.style.get("cursor"), Some("pointer"));
    assert_eq!(header.get_attribute("title"), Some("Click to sort"));
    assert_eq!(header.text_content(), "Part ↕️");
    assert_eq!(icon_text(&doc, "h1"), "↕️");
}

#[test]
fn test_init_renders_like_browser_markup() {
    let mut doc = table_doc(&["Part"], &[]);
    TableSorter::init(&mut doc);
    assert_eq!(
        render_element(doc.find("h0").unwrap()),
        r#"<th id="h0" style="cursor: pointer;" title="Click to sort">Part <span class="sort-icon">↕️</span></th>"#
    );
}

#[test]
fn test_reinit_duplicates_glyphs() {
    let mut doc = table_doc(&["Part"], &[&["b"], &["a"]]);
    let mut sorter = TableSorter::init(&mut doc);
    sorter.attach(&mut doc);
    assert_eq!(doc.find("h0").unwrap().text_content(), "Part ↕️ ↕️");

    // Two bindings on the header: one click sorts twice (asc then desc)
    click(&mut doc, &mut sorter, "h0");
    assert_eq!(sorter.state("t").unwrap().direction, Some(Direction::Desc));
    assert_eq!(column(&doc, 0), vec!["b", "a"]);
}

#[test]
fn test_tables_added_later_are_not_discovered() {
    let mut doc = table_doc(&["Part"], &[&["b"], &["a"]]);
    let mut sorter = TableSorter::init(&mut doc);

    doc.append_child(
        "page",
        Element::table()
            .id("late")
            .child(Element::tr().child(Element::th("X").id("late-h"))),
    )
    .unwrap();

    assert!(sorter.state("late").is_none());
    let result = doc.dispatch(&Event::click("late-h"), &mut sorter).unwrap();
    assert_eq!(result, EventResult::Ignored);
}

#[test]
fn test_init_seeds_direction_from_attribute() {
    let mut doc = single_column(&["1", "2"]);
    doc.find_mut("t").unwrap().set_attribute("data-sort-dir", "asc");
    let mut sorter = TableSorter::init(&mut doc);

    assert_eq!(sorter.state("t").unwrap().direction, Some(Direction::Asc));
    click(&mut doc, &mut sorter, "h0");
    assert_eq!(column(&doc, 0), vec!["2", "1"]);
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_numeric_ordering() {
    let mut doc = single_column(&["10", "2", "33"]);
    let mut sorter = TableSorter::init(&mut doc);

    click(&mut doc, &mut sorter, "h0");
    assert_eq!(column(&doc, 0), vec!["2", "10", "33"]);

    click(&mut doc, &mut sorter, "h0");
    assert_eq!(column(&doc, 0), vec!["33", "10", "2"]);
}

#[test]
fn test_lexical_fallback_is_case_insensitive() {
    let mut doc = single_column(&["banana", "Apple", "cherry"]);
    let mut sorter = TableSorter::init(&mut doc);

    click(&mut doc, &mut sorter, "h0");
    assert_eq!(column(&doc, 0), vec!["Apple", "banana", "cherry"]);
}

#[test]
fn test_mixed_numeric_and_text_compares_lexically() {
    let mut doc = single_column(&["apple", "10"]);
    let mut sorter = TableSorter::init(&mut doc);

    click(&mut doc, &mut sorter, "h0");
    assert_eq!(column(&doc, 0), vec!["10", "apple"]);

    click(&mut doc, &mut sorter, "h0");
    assert_eq!(column(&doc, 0), vec!["apple", "10"]);
}

#[test]
fn test_numeric_prefix_values() {
    let mut doc = single_column(&["10kΩ", "4.7k", "100R"]);
    let mut sorter = TableSorter::init(&mut doc);

    click(&mut doc, &mut sorter, "h0");
    assert_eq!(column(&doc, 0), vec!["4.7k", "10kΩ", "100R"]);
}

#[test]
fn test_whitespace_is_trimmed() {
    let mut doc = single_column(&["  42  ", "7", "100"]);
    let mut sorter = TableSorter::init(&mut doc);

    click(&mut doc, &mut sorter, "h0");
    assert_eq!(column(&doc, 0), vec!["7", "  42  ", "100"]);
}

#[test]
fn test_equal_keys_keep_original_order() {
    let mut doc = table_doc(
        &["Type", "Ref"],
        &[&["cap", "C1"], &["res", "R1"], &["cap", "C2"], &["Cap", "C3"]],
    );
    let mut sorter = TableSorter::init(&mut doc);

    click(&mut doc, &mut sorter, "h0");
    assert_eq!(column(&doc, 1), vec!["C1", "C2", "C3", "R1"]);
}

// ============================================================================
// Direction and icons
// ============================================================================

#[test]
fn test_double_toggle_reverses() {
    let mut doc = single_column(&["b", "c", "a"]);
    let mut sorter = TableSorter::init(&mut doc);

    click(&mut doc, &mut sorter, "h0");
    let ascending = column(&doc, 0);
    click(&mut doc, &mut sorter, "h0");
    let descending = column(&doc, 0);

    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
}

#[test]
fn test_direction_is_table_global() {
    let mut doc = table_doc(&["A", "B"], &[&["1", "x"], &["2", "y"]]);
    let mut sorter = TableSorter::init(&mut doc);

    click(&mut doc, &mut sorter, "h0");
    assert_eq!(sorter.state("t").unwrap().direction, Some(Direction::Asc));

    // A different column continues the shared toggle
    click(&mut doc, &mut sorter, "h1");
    assert_eq!(sorter.state("t").unwrap().direction, Some(Direction::Desc));
    assert_eq!(column(&doc, 1), vec!["y", "x"]);
    assert_eq!(
        doc.find("t").unwrap().get_attribute("data-sort-dir"),
        Some("desc")
    );
}

#[test]
fn test_icon_exclusivity() {
    let mut doc = table_doc(&["A", "B", "C"], &[&["1", "2", "3"], &["4", "5", "6"]]);
    let mut sorter = TableSorter::init(&mut doc);

    click(&mut doc, &mut sorter, "h0");
    click(&mut doc, &mut sorter, "h2");

    assert_eq!(icon_text(&doc, "h0"), "↕️");
    assert_eq!(icon_text(&doc, "h1"), "↕️");
    assert_eq!(icon_text(&doc, "h2"), "↓");
    assert_eq!(sorter.state("t").unwrap().sorted_column, Some(2));
}

#[test]
fn test_click_on_icon_bubbles_to_header() {
    let mut doc = single_column(&["2", "1"]);
    let mut sorter = TableSorter::init(&mut doc);

    let icon = doc.query_class("h0", "sort-icon").unwrap();
    click(&mut doc, &mut sorter, &icon);
    assert_eq!(column(&doc, 0), vec!["1", "2"]);
    assert_eq!(icon_text(&doc, "h0"), "↑");
}

#[test]
fn test_custom_glyphs() {
    let config = SorterConfig::default()
        .glyphs(Glyphs {
            neutral: "-".to_string(),
            ascending: "^".to_string(),
            descending: "v".to_string(),
        })
        .header_title(None);
    let mut doc = table_doc(&["A", "B"], &[&["1", "2"]]);
    let mut sorter = TableSorter::new(config);
    sorter.attach(&mut doc);

    assert_eq!(doc.find("h0").unwrap().get_attribute("title"), None);
    sorter.sort(&mut doc, "t", 1).unwrap();
    assert_eq!(icon_text(&doc, "h0"), "-");
    assert_eq!(icon_text(&doc, "h1"), "^");
}

// ============================================================================
// Row preservation
// ============================================================================

#[test]
fn test_row_count_preserved() {
    let values = ["5", "b", "  3", "A", "5", "", "-1", "1e2", "a"];
    let mut doc = single_column(&values);
    let mut sorter = TableSorter::init(&mut doc);

    for _ in 0..3 {
        click(&mut doc, &mut sorter, "h0");
        let mut after = column(&doc, 0);
        after.sort();
        let mut before: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        before.sort();
        assert_eq!(after, before);
    }
}

#[test]
fn test_rows_stay_direct_children_of_body() {
    let mut doc = single_column(&["3", "1", "2"]);
    let mut sorter = TableSorter::init(&mut doc);
    click(&mut doc, &mut sorter, "h0");

    let body = doc.find("body").unwrap();
    assert_eq!(body.child_elements().len(), 3);
    assert!(body.child_elements().iter().all(|c| c.tag == "tr"));
}

// ============================================================================
// Nested tables and parsed markup
// ============================================================================

#[test]
fn test_nested_table_header_bound_twice() {
    let mut doc = parse_fragment(
        r#"<table id="outer"><thead><tr><th id="oh">Outer</th></tr></thead>
           <tbody><tr><td>
             <table id="inner"><thead><tr><th id="ih">Inner</th></tr></thead>
             <tbody><tr><td>b</td></tr><tr><td>a</td></tr></tbody></table>
           </td></tr></tbody></table>"#,
    );
    let sorter = TableSorter::init(&mut doc);

    assert_eq!(sorter.tables().len(), 2);
    assert_eq!(sorter.column_count("outer"), Some(2));
    // One glyph span per enclosing table
    let ih = doc.find("ih").unwrap();
    assert_eq!(ih.text_content(), "Inner ↕️ ↕️");
}

/// Cell text of every body row of `table`, in order.
fn body_cells(doc: &Document, table: &str) -> Vec<String> {
    let body = doc.query_first(table, "tbody").unwrap();
    doc.query_all(&body, "td")
        .iter()
        .map(|cell| doc.text_content(cell).unwrap())
        .collect()
}

#[test]
fn test_failing_binding_does_not_block_others() {
    let mut doc = parse_fragment(
        r#"<table id="outer"><thead><tr><th id="oh">Outer</th></tr></thead>
           <tbody><tr><td>x</td><td>
             <table id="inner"><thead><tr><th id="ih">Inner</th></tr></thead>
             <tbody><tr><td>b</td></tr><tr><td>a</td></tr></tbody></table>
           </td></tr></tbody></table>"#,
    );
    let mut sorter = TableSorter::init(&mut doc);

    // The outer binding on "ih" runs first and trips over the inner header
    // row, which has no cells
    let err = doc.dispatch(&Event::click("ih"), &mut sorter).unwrap_err();
    assert_eq!(
        err,
        SortError::MissingCell {
            table: "outer".to_string(),
            row: 1,
            column: 1
        }
    );

    // The inner table's own binding still sorted it
    assert_eq!(sorter.state("inner").unwrap().direction, Some(Direction::Asc));
    assert_eq!(body_cells(&doc, "inner"), vec!["a", "b"]);
}

#[test]
fn test_duplicate_row_ids_stay_in_their_table() {
    let mut doc = parse_fragment(
        r#"<table id="a"><thead><tr><th id="ha">A</th></tr></thead>
             <tbody><tr id="r1"><td>A1</td></tr><tr id="r2"><td>A2</td></tr></tbody></table>
           <table id="b"><thead><tr><th id="hb">B</th></tr></thead>
             <tbody><tr id="r1"><td>zz</td></tr><tr id="r2"><td>aa</td></tr></tbody></table>"#,
    );
    let mut sorter = TableSorter::init(&mut doc);

    click(&mut doc, &mut sorter, "hb");

    assert_eq!(body_cells(&doc, "a"), vec!["A1", "A2"]);
    assert_eq!(body_cells(&doc, "b"), vec!["aa", "zz"]);
    // Both tables still carry their markup ids when rendered
    let html = render_element(doc.root());
    assert_eq!(html.matches(r#"<tr id="r1">"#).count(), 2);
    assert_eq!(html.matches(r#"<tr id="r2">"#).count(), 2);
}

#[test]
fn test_parsed_table_without_tbody() {
    let mut doc = parse_fragment(
        "<table id=\"t\"><tr><th>N</th></tr><tr><td>3</td></tr><tr><td>1</td></tr></table>",
    );
    let mut sorter = TableSorter::init(&mut doc);

    // The parser puts the header row in the implicit body, where it has no
    // td to key on
    let err = sorter.click(&mut doc, "t", 0).unwrap_err();
    assert_eq!(
        err,
        SortError::MissingCell {
            table: "t".to_string(),
            row: 0,
            column: 0
        }
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_body() {
    let mut doc = Document::new(
        Element::table()
            .id("t")
            .child(Element::thead().child(Element::tr().child(Element::th("A").id("h0")))),
    );
    let mut sorter = TableSorter::init(&mut doc);

    let err = doc.dispatch(&Event::click("h0"), &mut sorter).unwrap_err();
    assert_eq!(err, SortError::MissingBody("t".to_string()));
    // Direction untouched when the body is missing
    assert_eq!(sorter.state("t").unwrap().direction, None);
}

#[test]
fn test_missing_cell_leaves_rows_in_place() {
    let mut doc = table_doc(&["A", "B"], &[&["2", "x"], &["1"]]);
    let mut sorter = TableSorter::init(&mut doc);

    let err = sorter.sort(&mut doc, "t", 1).unwrap_err();
    assert_eq!(
        err,
        SortError::MissingCell {
            table: "t".to_string(),
            row: 1,
            column: 1
        }
    );
    assert_eq!(column(&doc, 0), vec!["2", "1"]);
    // Direction was already flipped before the comparison failed
    assert_eq!(sorter.state("t").unwrap().direction, Some(Direction::Asc));
    assert_eq!(icon_text(&doc, "h1"), "↕️");
}

#[test]
fn test_single_row_never_reads_cells() {
    let mut doc = table_doc(&["A", "B"], &[&["only"]]);
    let mut sorter = TableSorter::init(&mut doc);

    assert_eq!(sorter.sort(&mut doc, "t", 1), Ok(Direction::Asc));
    assert_eq!(icon_text(&doc, "h1"), "↑");
}

#[test]
fn test_unknown_table_and_column() {
    let mut doc = single_column(&["1"]);
    let mut sorter = TableSorter::init(&mut doc);

    assert_eq!(
        sorter.sort(&mut doc, "nope", 0),
        Err(SortError::UnknownTable("nope".to_string()))
    );
    assert!(matches!(
        sorter.click(&mut doc, "t", 5),
        Err(SortError::UnknownColumn { column: 5, .. })
    ));
}
