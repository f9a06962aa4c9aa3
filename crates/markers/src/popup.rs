use crate::region::Region;

/// Popup body for a region marker. The explore button carries a
/// `data-region` attribute the host wires to its click handler; there is no
/// window-scoped callback.
pub fn region_popup_html(region: &Region) -> String {
    format!(
        "<div class=\"region-popup\">\
         <h4>🎯 {name}</h4>\
         <p><strong>Type:</strong> {category}</p>\
         <p><strong>Coordinates:</strong> {lat:.4}, {lng:.4}</p>\
         <button class=\"explore-region-btn\" data-region=\"{name}\">🔍 Explore Region</button>\
         </div>",
        name = region.name,
        category = region.category.label(),
        lat = region.coords.lat,
        lng = region.coords.lng,
    )
}

/// Popup body for the boundary polygon. The explore button is wired the
/// same way, via `data-action`.
pub fn boundary_popup_html(name: &str, state_code: Option<&str>) -> String {
    format!(
        "<div class=\"alaska-popup\">\
         <h3>🏔️ {name}</h3>\
         <p><strong>State Code:</strong> {code}</p>\
         <p><strong>Area:</strong> 665,384 sq miles</p>\
         <p><strong>Population:</strong> ~733,000</p>\
         <button class=\"explore-button\" data-action=\"explore-boundary\">🔍 Explore Alaska</button>\
         </div>",
        code = state_code.unwrap_or("N/A"),
    )
}
