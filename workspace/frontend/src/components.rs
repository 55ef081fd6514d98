pub mod calculator;
pub mod chart;
pub mod county_search;
pub mod examples;
pub mod industry_select;
pub mod results;
