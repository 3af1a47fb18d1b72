//! HTML pages served by the statistics service.

use crate::dataset::Table;
use crate::utils::escape_html;

const TABLE_STYLE: &str = r#"table { border-collapse: collapse; width: 100%; }
            th, td { border: 1px solid black; padding: 8px; text-align: left; }"#;

/// Welcome page with usage instructions.
pub fn index_page() -> String {
    r#"<html>
    <head>
        <title>Public Health Data API</title>
    </head>
    <body>
        <h1>Welcome to the Public Health Data API program!</h1>
        <p>Use the /health_data endpoint to get data for a place and year.</p>
        <p>Use the /health_compare endpoint to compare data for two places and a year.</p>
        <p>Visit /docs to see the API documentation.</p>
    </body>
</html>
"#
    .to_string()
}

/// Page with one country's table.
pub fn health_data_page(country: &str, year: i32, table: &Table) -> String {
    let heading = format!("Health Data for {} ({})", escape_html(country), year);

    format!(
        r#"<html>
    <head>
        <title>{heading}</title>
        <style>
            {style}
        </style>
    </head>
    <body>
        <h1>{heading}</h1>
        {table}
    </body>
</html>
"#,
        heading = heading,
        style = TABLE_STYLE,
        table = table.to_html(),
    )
}

/// Page with one table per compared country.
pub fn comparison_page(
    country1: &str,
    country2: &str,
    year: i32,
    table1: &Table,
    table2: &Table,
) -> String {
    let first = escape_html(country1);
    let second = escape_html(country2);
    let heading = format!("Health Comparison: {} vs. {} ({})", first, second, year);

    format!(
        r#"<html>
    <head>
        <title>{heading}</title>
        <style>
            {style}
        </style>
    </head>
    <body>
        <h1>{heading}</h1>
        <h2>{first}</h2>
        {table1}
        <h2>{second}</h2>
        {table2}
    </body>
</html>
"#,
        heading = heading,
        style = TABLE_STYLE,
        first = first,
        second = second,
        table1 = table1.to_html(),
        table2 = table2.to_html(),
    )
}
