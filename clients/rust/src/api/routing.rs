use olamaps_protocol::{
    routing::{
        Directions, DirectionsParams, DistanceMatrix, DistanceMatrixParams, NearestRoads,
        NearestRoadsParams, SnapToRoad, SnapToRoadParams,
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
    /// Route between two `lat,lng` points. The provider expects a POST.
    pub async fn directions(&self, ctx: &CallContext, params: &DirectionsParams) -> ClientResult<Directions> {
        traced("directions", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let url = render(
                &self.endpoints.directions,
                &[
                    TemplateArg::Str(&params.origin),
                    TemplateArg::Str(&params.destination),
                ],
            )?;
            self.fetch_json(Method::POST, url, ctx, token).await
        })
        .await
    }

    pub async fn distance_matrix(
        &self,
        ctx: &CallContext,
        params: &DistanceMatrixParams,
    ) -> ClientResult<DistanceMatrix> {
        traced("distance_matrix", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let url = render(
                &self.endpoints.distance_matrix,
                &[
                    TemplateArg::Str(&query_escape(&params.origins)),
                    TemplateArg::Str(&query_escape(&params.destinations)),
                ],
            )?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }

    pub async fn snap_to_road(&self, ctx: &CallContext, params: &SnapToRoadParams) -> ClientResult<SnapToRoad> {
        traced("snap_to_road", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            // Keys in sorted order, matching what the provider documents.
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("enhancePath", &params.enhance_path)
                .append_pair("points", &params.points)
                .finish();
            let url = render(&self.endpoints.snap_to_road, &[TemplateArg::Str(&query)])?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }

    /// Nearest road for each point. `radius` is sent as given; callers that
    /// want the default should normalize the params first.
    pub async fn nearest_roads(
        &self,
        ctx: &CallContext,
        params: &NearestRoadsParams,
    ) -> ClientResult<NearestRoads> {
        traced("nearest_roads", ctx, async {
            params.validate()?;
            let token = ctx.require_token()?;
            let url = render(
                &self.endpoints.nearest_roads,
                &[
                    TemplateArg::Str(&params.points),
                    TemplateArg::Str(&params.radius),
                ],
            )?;
            self.fetch_json(Method::GET, url, ctx, token).await
        })
        .await
    }
}
