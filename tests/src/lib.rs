#[cfg(test)]
mod graph_properties;
#[cfg(test)]
mod malformed_patterns;
