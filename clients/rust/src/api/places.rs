use olamaps_protocol::{
    places::{
        Autocomplete, AutocompleteParams, Geocode, GeocodeParams, NearbySearch, NearbySearchParams,
        PlaceDetail, PlaceDetailParams, ReverseGeocode, ReverseGeocodeParams, TextSearch,
        TextSearchParams,
    },
    Validate,
};
use reqwest::Method;

use super::{traced, CallContext, MapsApi};
use crate::{
    config::{query_escape, render, TemplateArg},
    error::ClientResult,
};

impl MapsApi {
    pub async fn place_autocomplete(
        &self,
        ctx: &CallContext,
        params: &AutocompleteParams,
    ) -> ClientResult<Autocomplete> {
        traced("place_autocomplete", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let url = render(&self.endpoints.place_autocomplete, &[TemplateArg::Str(&params.input)])?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }

    /// Forward geocoding. `bounds` and `language` are optional and sent empty
    /// when not given.
    pub async fn geocode(&self, ctx: &CallContext, params: &GeocodeParams) -> ClientResult<Geocode> {
        traced("geocode", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let url = render(
                &self.endpoints.geocode,
                &[
                    TemplateArg::Str(&params.address),
                    TemplateArg::Str(&params.bounds),
                    TemplateArg::Str(&params.language),
                ],
            )?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }

    pub async fn reverse_geocode(
        &self,
        ctx: &CallContext,
        params: &ReverseGeocodeParams,
    ) -> ClientResult<ReverseGeocode> {
        traced("reverse_geocode", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let url = render(
                &self.endpoints.reverse_geocode,
                &[TemplateArg::Str(&query_escape(&params.latlng))],
            )?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }

    pub async fn place_detail(&self, ctx: &CallContext, params: &PlaceDetailParams) -> ClientResult<PlaceDetail> {
        traced("place_detail", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let url = render(&self.endpoints.place_detail, &[TemplateArg::Str(&params.place_id)])?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }

    pub async fn nearby_search(
        &self,
        ctx: &CallContext,
        params: &NearbySearchParams,
    ) -> ClientResult<NearbySearch> {
        traced("nearby_search", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let url = render(
                &self.endpoints.nearby_search,
                &[
                    TemplateArg::Str(&params.layers),
                    TemplateArg::Str(&params.location),
                    TemplateArg::Str(&params.types),
                    TemplateArg::Str(&params.radius),
                    TemplateArg::Str(&params.strictbounds),
                    TemplateArg::Str(&params.with_centroid),
                    TemplateArg::Str(&params.limit),
                ],
            )?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }

    /// Free-text search; only `input` is escaped.
    pub async fn text_search(&self, ctx: &CallContext, params: &TextSearchParams) -> ClientResult<TextSearch> {
        traced("text_search", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let url = render(
                &self.endpoints.text_search,
                &[
                    TemplateArg::Str(&query_escape(&params.input)),
                    TemplateArg::Str(&params.location),
                    TemplateArg::Str(&params.radius),
                    TemplateArg::Str(&params.types),
                    TemplateArg::Str(&params.size),
                ],
            )?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }
}
