//! Page-number pagination for API listings.
//!
//! `page` defaults to 1 and also accepts `last`. Anything that is not a page
//! number in range is rejected, except that an empty result set still has a
//! first page.

use todo_core::Listing;

use crate::error::AppError;

pub fn paginate<T>(
    items: Vec<T>,
    page: Option<&str>,
    page_size: usize,
    link: impl Fn(usize) -> String,
) -> Result<Listing<T>, AppError> {
    let page_size = page_size.max(1);
    let count = items.len();
    let num_pages = count.div_ceil(page_size).max(1);

    let number = match page {
        None => 1,
        Some("last") => num_pages,
        Some(raw) => raw.parse::<usize>().map_err(|_| AppError::InvalidPage)?,
    };
    if number == 0 || number > num_pages {
        return Err(AppError::InvalidPage);
    }

    let results = items
        .into_iter()
        .skip((number - 1) * page_size)
        .take(page_size)
        .collect();

    Ok(Listing {
        count,
        next: (number < num_pages).then(|| link(number + 1)),
        previous: (number > 1).then(|| link(number - 1)),
        results,
    })
}
